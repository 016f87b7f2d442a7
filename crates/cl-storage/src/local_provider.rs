use crate::{
    Result as StorageErrorResult, SaveAction, SaveOutcome, StorageError, StorageInfo,
    StorageProvider,
};

use std::sync::Arc;

use async_trait::async_trait;
use cl_auth::IdentitySource;
use cl_core::{
    CampaignId, CampaignRecord, KeyPrefix, ProviderKind, StorageKey, UserIdentity,
};
use cl_kv::KeyValueStore;
use log::{debug, warn};

/// Records kept in the device's key-value store. Also serves as the
/// fast-path cache in front of a remote provider.
pub struct LocalProvider {
    store: Arc<dyn KeyValueStore>,
    identity: Arc<dyn IdentitySource>,
    prefix: KeyPrefix,
}

impl LocalProvider {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        identity: Arc<dyn IdentitySource>,
        prefix: KeyPrefix,
    ) -> Self {
        Self {
            store,
            identity,
            prefix,
        }
    }

    pub fn prefix(&self) -> &KeyPrefix {
        &self.prefix
    }

    fn active_identity(&self) -> StorageErrorResult<UserIdentity> {
        self.identity.resolve().ok_or_else(StorageError::not_signed_in)
    }
}

#[async_trait]
impl StorageProvider for LocalProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Local
    }

    async fn init(&self) -> StorageErrorResult<()> {
        self.active_identity().map(|_| ())
    }

    async fn save(
        &self,
        campaign: &CampaignId,
        record: &CampaignRecord,
    ) -> StorageErrorResult<SaveOutcome> {
        let identity = self.active_identity()?;
        let key = StorageKey::record(&self.prefix, campaign, &identity.id);
        write_owned_record(self.store.as_ref(), &key, record, &identity)?;

        Ok(SaveOutcome::new(SaveAction::SavedLocally, key.as_str()))
    }

    async fn load(&self, campaign: &CampaignId) -> StorageErrorResult<Option<CampaignRecord>> {
        let identity = self.active_identity()?;
        let key = StorageKey::record(&self.prefix, campaign, &identity.id);
        read_owned_record(self.store.as_ref(), &key, &identity)
    }

    async fn delete(&self, campaign: &CampaignId) -> StorageErrorResult<bool> {
        let identity = self.active_identity()?;
        let key = StorageKey::record(&self.prefix, campaign, &identity.id);
        Ok(self.store.remove(key.as_str())?)
    }

    fn is_available(&self) -> bool {
        self.identity.resolve().is_some()
    }

    fn storage_info(&self) -> StorageInfo {
        let identity = self.identity.resolve();
        let message = match &identity {
            Some(identity) => format!("Saved on this device for {}", identity.display_name),
            None => "Not signed in".to_string(),
        };

        StorageInfo::new(ProviderKind::Local, identity.as_ref(), message)
    }
}

/// Writes `record` at `key` if `identity` owns it.
pub fn write_owned_record(
    store: &dyn KeyValueStore,
    key: &StorageKey,
    record: &CampaignRecord,
    identity: &UserIdentity,
) -> StorageErrorResult<()> {
    if !record.is_owned_by(identity) {
        return Err(StorageError::ownership_mismatch(
            &record.metadata.user_id,
            &identity.id,
        ));
    }

    let json = record.to_json().map_err(StorageError::encode)?;
    store.set(key.as_str(), &json)?;
    debug!("Wrote record to {key}");

    Ok(())
}

/// Reads the record at `key`.
///
/// Unparseable entries are removed. Records owned by anyone other than
/// `identity` are treated as absent.
pub fn read_owned_record(
    store: &dyn KeyValueStore,
    key: &StorageKey,
    identity: &UserIdentity,
) -> StorageErrorResult<Option<CampaignRecord>> {
    let Some(json) = store.get(key.as_str())? else {
        return Ok(None);
    };

    let record = match CampaignRecord::from_json(&json) {
        Ok(record) => record,
        Err(e) => {
            warn!("{}", StorageError::corrupt(key.as_str(), e));
            store.remove(key.as_str())?;
            return Ok(None);
        }
    };

    if !record.is_owned_by(identity) {
        warn!(
            "Ignoring record at {key}: owned by '{}', not '{}'",
            record.metadata.user_id, identity.id
        );
        return Ok(None);
    }

    Ok(Some(record))
}
