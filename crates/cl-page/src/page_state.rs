/// Lifecycle of one campaign page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// Constructed, `open` not yet called
    #[default]
    Uninitialized,
    ResolvingIdentity,
    /// No identity; controls stay disabled
    NotSignedIn,
    /// Identity known, data not yet applied
    Ready,
    Loading,
    /// Page shows the freshest record found (or an empty form)
    Loaded,
    Saving,
    Resetting,
}
