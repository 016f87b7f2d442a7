use cl_storage::StorageError;

/// Outcome of preparing the primary provider.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProviderStatus {
    #[default]
    Pending,
    Ready,
    Unavailable { reason: String },
}

impl ProviderStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }
}

impl From<&Result<(), StorageError>> for ProviderStatus {
    fn from(result: &Result<(), StorageError>) -> Self {
        match result {
            Ok(()) => Self::Ready,
            Err(e) => Self::Unavailable {
                reason: e.to_string(),
            },
        }
    }
}
