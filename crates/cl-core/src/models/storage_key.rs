use crate::{CampaignId, KEY_SEPARATOR, KeyPrefix};

const RECORD_NAMESPACE: &str = "record";
const EMERGENCY_NAMESPACE: &str = "emergency";
const USER_INFO_KEY: &str = "user_info";
const LOCAL_USER_KEY: &str = "local_user";

/// Key of one local storage entry.
///
/// Per-record keys have the shape `<prefix>:<namespace>:<campaign>:<user>`.
/// Prefix, namespace and campaign id never contain the separator, so two
/// distinct (campaign, user) pairs can never produce the same key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorageKey(String);

impl StorageKey {
    /// Fast-path record of one campaign for one user.
    pub fn record(prefix: &KeyPrefix, campaign: &CampaignId, user_id: &str) -> Self {
        Self::scoped(prefix, RECORD_NAMESPACE, campaign, user_id)
    }

    /// Fallback slot written when the primary save fails.
    pub fn emergency(prefix: &KeyPrefix, campaign: &CampaignId, user_id: &str) -> Self {
        Self::scoped(prefix, EMERGENCY_NAMESPACE, campaign, user_id)
    }

    /// Cached sign-in credential claims.
    pub fn user_info(prefix: &KeyPrefix) -> Self {
        Self(format!("{prefix}{KEY_SEPARATOR}{USER_INFO_KEY}"))
    }

    /// Generated local pseudo-user.
    pub fn local_user(prefix: &KeyPrefix) -> Self {
        Self(format!("{prefix}{KEY_SEPARATOR}{LOCAL_USER_KEY}"))
    }

    fn scoped(prefix: &KeyPrefix, namespace: &str, campaign: &CampaignId, user_id: &str) -> Self {
        Self(format!(
            "{prefix}{sep}{namespace}{sep}{campaign}{sep}{user_id}",
            sep = KEY_SEPARATOR
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StorageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
