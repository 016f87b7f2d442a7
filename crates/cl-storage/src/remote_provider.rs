use crate::{
    DriveClient, Result as StorageErrorResult, SaveAction, SaveOutcome, StorageError,
    StorageInfo, StorageProvider,
};

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use cl_auth::{AccessToken, IdentitySource, TokenSource};
use cl_config::RemoteConfig;
use cl_core::{CampaignId, CampaignRecord, ProviderKind, UserIdentity};
use log::{info, warn};
use tokio::sync::Mutex;

/// Remote file naming and authorization parameters.
#[derive(Debug, Clone)]
pub struct RemoteSettings {
    pub file_prefix: String,
    pub scope: String,
    pub auth_timeout: Duration,
}

impl From<&RemoteConfig> for RemoteSettings {
    fn from(config: &RemoteConfig) -> Self {
        Self {
            file_prefix: config.file_prefix.clone(),
            scope: config.scope.clone(),
            auth_timeout: config.auth_timeout(),
        }
    }
}

/// `<prefix>_<campaign>_<user>.json`
pub fn remote_file_name(file_prefix: &str, campaign: &CampaignId, user_id: &str) -> String {
    format!("{file_prefix}_{campaign}_{user_id}.json")
}

/// Records stored as one JSON file per (campaign, user) in remote file
/// hosting.
pub struct RemoteProvider {
    client: DriveClient,
    tokens: Arc<dyn TokenSource>,
    identity: Arc<dyn IdentitySource>,
    settings: RemoteSettings,
    token: RwLock<Option<AccessToken>>,
    authorizing: Mutex<()>,
}

impl RemoteProvider {
    pub fn new(
        client: DriveClient,
        tokens: Arc<dyn TokenSource>,
        identity: Arc<dyn IdentitySource>,
        settings: RemoteSettings,
    ) -> Self {
        Self {
            client,
            tokens,
            identity,
            settings,
            token: RwLock::new(None),
            authorizing: Mutex::new(()),
        }
    }

    pub fn from_config(
        config: &RemoteConfig,
        tokens: Arc<dyn TokenSource>,
        identity: Arc<dyn IdentitySource>,
    ) -> Self {
        Self::new(
            DriveClient::new(&config.api_base_url),
            tokens,
            identity,
            RemoteSettings::from(config),
        )
    }

    /// Whether an access token has been obtained.
    pub fn has_permission(&self) -> bool {
        self.current_token().is_some()
    }

    /// Runs the authorization flow again, replacing any held token.
    pub async fn request_permission(&self) -> bool {
        let _guard = self.authorizing.lock().await;
        match self.acquire_token().await {
            Ok(token) => {
                self.store_token(Some(token));
                true
            }
            Err(e) => {
                warn!("Permission request failed: {e}");
                false
            }
        }
    }

    /// Drops the held token, e.g. on sign-out.
    pub fn revoke(&self) {
        self.store_token(None);
    }

    fn current_token(&self) -> Option<AccessToken> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store_token(&self, token: Option<AccessToken>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = token;
    }

    async fn acquire_token(&self) -> StorageErrorResult<AccessToken> {
        let timeout = self.settings.auth_timeout;
        match tokio::time::timeout(
            timeout,
            self.tokens.request_access_token(&self.settings.scope),
        )
        .await
        {
            Ok(Ok(token)) => Ok(token),
            Ok(Err(e)) => Err(StorageError::provider_unavailable(format!(
                "authorization failed: {e}"
            ))),
            Err(_) => Err(StorageError::provider_unavailable(format!(
                "authorization timed out after {timeout:?}"
            ))),
        }
    }

    fn authorized(&self) -> StorageErrorResult<(UserIdentity, AccessToken)> {
        let identity = self
            .identity
            .resolve()
            .ok_or_else(StorageError::not_signed_in)?;
        let token = self
            .current_token()
            .ok_or_else(|| StorageError::provider_unavailable("authorization not granted"))?;

        Ok((identity, token))
    }

    fn file_name(&self, campaign: &CampaignId, identity: &UserIdentity) -> String {
        remote_file_name(&self.settings.file_prefix, campaign, &identity.id)
    }
}

#[async_trait]
impl StorageProvider for RemoteProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Remote
    }

    async fn init(&self) -> StorageErrorResult<()> {
        if self.identity.resolve().is_none() {
            return Err(StorageError::not_signed_in());
        }

        let _guard = self.authorizing.lock().await;
        if self.has_permission() {
            return Ok(());
        }

        let token = self.acquire_token().await?;
        self.store_token(Some(token));
        info!("Remote storage authorized");

        Ok(())
    }

    async fn save(
        &self,
        campaign: &CampaignId,
        record: &CampaignRecord,
    ) -> StorageErrorResult<SaveOutcome> {
        let (identity, token) = self.authorized()?;
        if !record.is_owned_by(&identity) {
            return Err(StorageError::ownership_mismatch(
                &record.metadata.user_id,
                &identity.id,
            ));
        }

        let name = self.file_name(campaign, &identity);
        let content = record.to_json_pretty().map_err(StorageError::encode)?;

        let outcome = match self.client.find_file(&token, &name).await? {
            Some(existing) => {
                let file = self.client.update_file(&token, &existing.id, &content).await?;
                SaveOutcome::new(SaveAction::Updated, file.id)
            }
            None => {
                let file = self.client.create_file(&token, &name, &content).await?;
                SaveOutcome::new(SaveAction::Created, file.id)
            }
        };
        info!("Saved {name} ({:?})", outcome.action);

        Ok(outcome)
    }

    async fn load(&self, campaign: &CampaignId) -> StorageErrorResult<Option<CampaignRecord>> {
        let (identity, token) = self.authorized()?;
        let name = self.file_name(campaign, &identity);

        let Some(file) = self.client.find_file(&token, &name).await? else {
            return Ok(None);
        };
        let Some(content) = self.client.download_file(&token, &file.id).await? else {
            return Ok(None);
        };

        let record = match CampaignRecord::from_json(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!("{}", StorageError::corrupt(name.as_str(), e));
                self.client.delete_file(&token, &file.id).await?;
                return Ok(None);
            }
        };

        if !record.is_owned_by(&identity) {
            warn!(
                "Ignoring {name}: owned by '{}', not '{}'",
                record.metadata.user_id, identity.id
            );
            return Ok(None);
        }

        Ok(Some(record))
    }

    async fn delete(&self, campaign: &CampaignId) -> StorageErrorResult<bool> {
        let (identity, token) = self.authorized()?;
        let name = self.file_name(campaign, &identity);

        match self.client.find_file(&token, &name).await? {
            Some(file) => Ok(self.client.delete_file(&token, &file.id).await?),
            None => Ok(false),
        }
    }

    fn is_available(&self) -> bool {
        self.has_permission()
    }

    fn storage_info(&self) -> StorageInfo {
        let identity = self.identity.resolve();
        let message = match (&identity, self.has_permission()) {
            (None, _) => "Not signed in".to_string(),
            (Some(identity), true) => format!("Synced to cloud for {}", identity.display_name),
            (Some(_), false) => "Cloud storage not connected".to_string(),
        };

        StorageInfo::new(ProviderKind::Remote, identity.as_ref(), message)
    }
}
