use cl_core::{ProviderKind, UserIdentity};

/// Human-readable description of where records currently go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageInfo {
    pub kind: ProviderKind,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub message: String,
}

impl StorageInfo {
    pub fn new(kind: ProviderKind, identity: Option<&UserIdentity>, message: impl Into<String>) -> Self {
        Self {
            kind,
            user_id: identity.map(|i| i.id.clone()),
            user_name: identity.map(|i| i.display_name.clone()),
            message: message.into(),
        }
    }
}
