use cl_core::UserIdentity;

/// Produces the identity records are scoped to.
pub trait IdentitySource: Send + Sync {
    /// `None` means "not signed in". It is never an error.
    fn resolve(&self) -> Option<UserIdentity>;
}
