use crate::{
    LocalProvider, RemoteProvider, Result as StorageErrorResult, StorageError, StorageProvider,
};

use std::sync::Arc;

use cl_auth::{IdentitySource, TokenSource};
use cl_config::RemoteConfig;
use cl_core::{KeyPrefix, ProviderKind};
use cl_kv::KeyValueStore;
use log::info;

/// The fast-path cache plus the provider records are primarily saved to.
///
/// With the local provider selected both point at the same instance.
#[derive(Clone)]
pub struct ProviderSet {
    pub fast_path: Arc<LocalProvider>,
    pub primary: Arc<dyn StorageProvider>,
}

/// Builds the providers for the configured storage backend.
///
/// The remote backend needs a token source.
pub fn select_provider(
    kind: ProviderKind,
    remote: &RemoteConfig,
    store: Arc<dyn KeyValueStore>,
    identity: Arc<dyn IdentitySource>,
    prefix: KeyPrefix,
    tokens: Option<Arc<dyn TokenSource>>,
) -> StorageErrorResult<ProviderSet> {
    let fast_path = Arc::new(LocalProvider::new(store, Arc::clone(&identity), prefix));

    let primary: Arc<dyn StorageProvider> = match kind {
        ProviderKind::Local => Arc::clone(&fast_path) as Arc<dyn StorageProvider>,
        ProviderKind::Remote => {
            let tokens = tokens.ok_or_else(|| {
                StorageError::provider_unavailable("remote storage requires a token source")
            })?;
            Arc::new(RemoteProvider::from_config(remote, tokens, identity))
        }
    };
    info!("Primary storage provider: {kind}");

    Ok(ProviderSet { fast_path, primary })
}
