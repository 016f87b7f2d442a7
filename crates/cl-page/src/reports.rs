use cl_storage::{SaveAction, StorageErrorKind};

/// Where the record shown on the page came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordSource {
    FastPath,
    Primary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    Loaded {
        /// `None` when no record exists yet
        source: Option<RecordSource>,
        /// Set when the primary provider could not be read
        primary_failure: Option<StorageErrorKind>,
    },
    NotSignedIn,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveReport {
    Saved { action: SaveAction },
    /// Primary save failed; the record went to the emergency slot
    SavedToEmergency { primary_failure: StorageErrorKind },
    /// Neither the primary nor the emergency slot accepted the record
    Failed { primary_failure: StorageErrorKind },
    NotSignedIn,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetOutcome {
    /// `complete` is false if some stored copy could not be deleted
    Reset { complete: bool },
    Declined,
    NotSignedIn,
    Busy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryReport {
    Recovered { fields_applied: usize },
    NothingToRecover,
    NotSignedIn,
    Busy,
}
