use crate::IdentitySource;

use std::sync::Arc;

use cl_core::{KeyPrefix, StorageKey, UserIdentity};
use cl_kv::KeyValueStore;
use log::{info, warn};
use uuid::Uuid;

const LOCAL_DISPLAY_NAME: &str = "Local User";
const LOCAL_ID_PREFIX: &str = "local-";

/// Identity for devices without sign-in: a pseudo-user generated once and
/// persisted in local storage.
pub struct LocalIdentityResolver {
    store: Arc<dyn KeyValueStore>,
    key: StorageKey,
}

impl LocalIdentityResolver {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: &KeyPrefix) -> Self {
        Self {
            store,
            key: StorageKey::local_user(prefix),
        }
    }

    /// Returns the persisted pseudo-user, creating it on first call.
    ///
    /// Never fails. If the new identity cannot be persisted it is still
    /// returned, and the next call generates another one.
    pub fn resolve_local(&self) -> UserIdentity {
        match self.store.get(self.key.as_str()) {
            Ok(Some(json)) => match serde_json::from_str::<UserIdentity>(&json) {
                Ok(identity) => return identity,
                Err(e) => warn!("Local user entry at {} corrupted: {e}", self.key),
            },
            Ok(None) => {}
            Err(e) => warn!("Failed to read local user at {}: {e}", self.key),
        }

        let identity = UserIdentity::new(
            format!("{LOCAL_ID_PREFIX}{}", Uuid::new_v4()),
            LOCAL_DISPLAY_NAME,
        );

        match serde_json::to_string(&identity) {
            Ok(json) => match self.store.set(self.key.as_str(), &json) {
                Ok(()) => info!("Created local user {}", identity.id),
                Err(e) => warn!("Failed to persist local user {}: {e}", identity.id),
            },
            Err(e) => warn!("Failed to serialize local user {}: {e}", identity.id),
        }

        identity
    }
}

impl IdentitySource for LocalIdentityResolver {
    fn resolve(&self) -> Option<UserIdentity> {
        Some(self.resolve_local())
    }
}
