/// How a successful save landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    /// New remote file
    Created,
    /// Existing remote file overwritten
    Updated,
    SavedLocally,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub action: SaveAction,
    /// Storage key or remote file id the record was written to.
    pub location: String,
}

impl SaveOutcome {
    pub fn new(action: SaveAction, location: impl Into<String>) -> Self {
        Self {
            action,
            location: location.into(),
        }
    }
}
