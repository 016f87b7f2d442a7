use crate::{Result as StorageErrorResult, SaveOutcome, StorageInfo};

use async_trait::async_trait;
use cl_core::{CampaignId, CampaignRecord, ProviderKind};

/// Persists one record per (campaign, active identity).
///
/// No operation retries; callers own fallback.
#[async_trait]
pub trait StorageProvider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    /// Prepare the provider. Calls after a success are no-ops.
    async fn init(&self) -> StorageErrorResult<()>;

    /// Overwrite the record. Its owner must be the active identity.
    async fn save(
        &self,
        campaign: &CampaignId,
        record: &CampaignRecord,
    ) -> StorageErrorResult<SaveOutcome>;

    /// `None` when absent, corrupt (the entry is removed) or owned by
    /// someone else.
    async fn load(&self, campaign: &CampaignId) -> StorageErrorResult<Option<CampaignRecord>>;

    /// Whether a record was removed.
    async fn delete(&self, campaign: &CampaignId) -> StorageErrorResult<bool>;

    fn is_available(&self) -> bool;

    fn storage_info(&self) -> StorageInfo;
}
