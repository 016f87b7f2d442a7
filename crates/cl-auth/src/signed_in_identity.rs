use crate::{AuthError, CredentialClaims, IdentitySource, Result as AuthErrorResult};
use crate::decode_credential;

use std::sync::Arc;

use cl_core::{KeyPrefix, StorageKey, UserIdentity};
use cl_kv::KeyValueStore;
use log::{info, warn};

/// Identity taken from a sign-in credential whose decoded claims are cached
/// in local storage.
pub struct SignedInIdentityResolver {
    store: Arc<dyn KeyValueStore>,
    key: StorageKey,
}

impl SignedInIdentityResolver {
    pub fn new(store: Arc<dyn KeyValueStore>, prefix: &KeyPrefix) -> Self {
        Self {
            store,
            key: StorageKey::user_info(prefix),
        }
    }

    /// Decodes a sign-in credential and caches its claims.
    pub fn sign_in(&self, credential: &str) -> AuthErrorResult<UserIdentity> {
        let claims = decode_credential(credential)?;
        self.store_claims(&claims)
    }

    /// Caches already-decoded claims.
    pub fn store_claims(&self, claims: &CredentialClaims) -> AuthErrorResult<UserIdentity> {
        claims.validate()?;
        let identity = claims
            .to_identity()
            .ok_or_else(|| AuthError::invalid_claim("sub", "no usable user id"))?;

        let json = serde_json::to_string(claims)?;
        self.store.set(self.key.as_str(), &json)?;

        info!("Signed in as {}", identity.id);
        Ok(identity)
    }

    /// Removes the cached claims. Returns whether anyone was signed in.
    pub fn sign_out(&self) -> AuthErrorResult<bool> {
        let removed = self.store.remove(self.key.as_str())?;
        if removed {
            info!("Signed out");
        }
        Ok(removed)
    }

    pub fn is_signed_in(&self) -> bool {
        self.resolve().is_some()
    }

    /// Cached claims, dropping the entry if it is unreadable or incomplete.
    pub fn cached_claims(&self) -> Option<CredentialClaims> {
        let json = match self.store.get(self.key.as_str()) {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read cached credential at {}: {e}", self.key);
                return None;
            }
        };

        let claims = serde_json::from_str::<CredentialClaims>(&json)
            .map_err(AuthError::from)
            .and_then(|claims| claims.validate().map(|()| claims));

        match claims {
            Ok(claims) => Some(claims),
            Err(e) => {
                warn!("Discarding cached credential at {}: {e}", self.key);
                if let Err(e) = self.store.remove(self.key.as_str()) {
                    warn!("Failed to remove cached credential at {}: {e}", self.key);
                }
                None
            }
        }
    }
}

impl IdentitySource for SignedInIdentityResolver {
    fn resolve(&self) -> Option<UserIdentity> {
        self.cached_claims()?.to_identity()
    }
}
