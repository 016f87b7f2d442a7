use crate::ClientError;

use std::panic::Location;

use cl_core::CoreError;
use cl_kv::KvError;
use error_location::ErrorLocation;
use thiserror::Error;

/// What went wrong, as far as a caller deciding on fallback cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    NotSignedIn,
    ProviderUnavailable,
    RecordOwnershipMismatch,
    StorageCorrupt,
    WriteFailed,
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No signed-in identity {location}")]
    NotSignedIn { location: ErrorLocation },

    #[error("Storage provider unavailable: {reason} {location}")]
    ProviderUnavailable {
        reason: String,
        location: ErrorLocation,
    },

    #[error("Record belongs to '{record_user}', active identity is '{active_user}' {location}")]
    RecordOwnershipMismatch {
        record_user: String,
        active_user: String,
        location: ErrorLocation,
    },

    #[error("Stored record at {key} is corrupt: {source} {location}")]
    StorageCorrupt {
        key: String,
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Record could not be encoded: {source} {location}")]
    Encode {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Local storage failed: {source} {location}")]
    Kv {
        #[source]
        source: KvError,
        location: ErrorLocation,
    },

    #[error("Remote storage failed: {source} {location}")]
    Remote {
        #[source]
        source: ClientError,
        location: ErrorLocation,
    },
}

impl StorageError {
    #[track_caller]
    pub fn not_signed_in() -> Self {
        Self::NotSignedIn {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn provider_unavailable(reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            reason: reason.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn ownership_mismatch(record_user: impl Into<String>, active_user: impl Into<String>) -> Self {
        Self::RecordOwnershipMismatch {
            record_user: record_user.into(),
            active_user: active_user.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn corrupt(key: impl Into<String>, source: CoreError) -> Self {
        Self::StorageCorrupt {
            key: key.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn encode(source: CoreError) -> Self {
        Self::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn kind(&self) -> StorageErrorKind {
        match self {
            Self::NotSignedIn { .. } => StorageErrorKind::NotSignedIn,
            Self::ProviderUnavailable { .. } => StorageErrorKind::ProviderUnavailable,
            Self::RecordOwnershipMismatch { .. } => StorageErrorKind::RecordOwnershipMismatch,
            Self::StorageCorrupt { .. } => StorageErrorKind::StorageCorrupt,
            Self::Remote { source, .. } if source.is_unavailable() => {
                StorageErrorKind::ProviderUnavailable
            }
            Self::Encode { .. } | Self::Kv { .. } | Self::Remote { .. } => {
                StorageErrorKind::WriteFailed
            }
        }
    }
}

impl From<KvError> for StorageError {
    #[track_caller]
    fn from(source: KvError) -> Self {
        Self::Kv {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ClientError> for StorageError {
    #[track_caller]
    fn from(source: ClientError) -> Self {
        Self::Remote {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
