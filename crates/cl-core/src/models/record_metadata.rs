use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Save metadata attached to every record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    /// Owner of the record
    pub user_id: String,
    pub user_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
    /// Serialized as ISO 8601 (RFC 3339)
    pub last_modified: DateTime<Utc>,
    pub schema_version: String,
}
