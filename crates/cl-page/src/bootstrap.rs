use crate::{PageController, PageSettings, PageView, Result as PageErrorResult};

use std::sync::Arc;

use cl_auth::{IdentitySource, LocalIdentityResolver, SignedInIdentityResolver, TokenSource};
use cl_config::Config;
use cl_core::{CampaignId, ProviderKind};
use cl_kv::{FileStore, KeyValueStore};
use cl_storage::select_provider;
use log::info;

/// Opens the on-disk key-value store under the configured data directory.
pub fn open_store(config: &Config) -> PageErrorResult<Arc<FileStore>> {
    let dir = config.data_dir()?;
    let store = FileStore::open(&dir)?;
    info!("Local storage at {}", dir.display());

    Ok(Arc::new(store))
}

/// Wires a controller for `campaign` from configuration.
///
/// Local storage uses a generated pseudo-user; remote storage requires a
/// signed-in identity and a token source. The emergency slot lives in
/// `store` next to the fast-path records.
pub fn build_controller<V: PageView>(
    config: &Config,
    store: Arc<dyn KeyValueStore>,
    campaign: CampaignId,
    view: Arc<V>,
    tokens: Option<Arc<dyn TokenSource>>,
) -> PageErrorResult<PageController<V>> {
    let prefix = config.storage.key_prefix()?;

    let identity: Arc<dyn IdentitySource> = match config.storage.provider {
        ProviderKind::Local => Arc::new(LocalIdentityResolver::new(Arc::clone(&store), &prefix)),
        ProviderKind::Remote => {
            Arc::new(SignedInIdentityResolver::new(Arc::clone(&store), &prefix))
        }
    };

    let providers = select_provider(
        config.storage.provider,
        &config.remote,
        Arc::clone(&store),
        Arc::clone(&identity),
        prefix.clone(),
        tokens,
    )?;

    Ok(PageController::new(
        campaign,
        identity,
        providers,
        store,
        prefix,
        PageSettings::from(&config.page),
        view,
    ))
}
