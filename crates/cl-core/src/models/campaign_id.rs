use crate::{CoreError, KEY_SEPARATOR, Result as CoreErrorResult};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MAX_CAMPAIGN_ID_LENGTH: usize = 128;

/// Identifier of one campaign log page, e.g. `mutantGenesis`.
///
/// Never empty and never contains the storage key separator, which keeps
/// derived storage keys unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CampaignId(String);

impl CampaignId {
    #[track_caller]
    pub fn new(value: impl Into<String>) -> CoreErrorResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(CoreError::invalid_campaign_id(value, "cannot be empty"));
        }
        if value.len() > MAX_CAMPAIGN_ID_LENGTH {
            return Err(CoreError::invalid_campaign_id(
                value,
                format!("exceeds {MAX_CAMPAIGN_ID_LENGTH} bytes"),
            ));
        }
        if value.contains(KEY_SEPARATOR) {
            return Err(CoreError::invalid_campaign_id(
                value,
                format!("cannot contain '{KEY_SEPARATOR}'"),
            ));
        }
        if value.chars().any(char::is_control) {
            return Err(CoreError::invalid_campaign_id(
                value,
                "cannot contain control characters",
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CampaignId {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for CampaignId {
    type Error = CoreError;

    #[track_caller]
    fn try_from(value: String) -> CoreErrorResult<Self> {
        Self::new(value)
    }
}

impl From<CampaignId> for String {
    fn from(id: CampaignId) -> Self {
        id.0
    }
}

impl std::fmt::Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
