use crate::{FieldSnapshot, RecordMetadata, Result as CoreErrorResult, UserIdentity};

use serde::{Deserialize, Serialize};

/// Serialized form snapshot plus metadata; the unit of persistence.
///
/// Always written wholesale. There is no field-level merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub fields: FieldSnapshot,
    pub metadata: RecordMetadata,
}

impl CampaignRecord {
    pub fn is_owned_by(&self, identity: &UserIdentity) -> bool {
        self.metadata.user_id == identity.id
    }

    /// Strictly newer; equal timestamps are not newer.
    pub fn is_newer_than(&self, other: &CampaignRecord) -> bool {
        self.metadata.last_modified > other.metadata.last_modified
    }

    pub fn to_json(&self) -> CoreErrorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty JSON, as uploaded to remote file hosting.
    pub fn to_json_pretty(&self) -> CoreErrorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> CoreErrorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
