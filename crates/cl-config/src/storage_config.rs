use crate::{ConfigError, ConfigErrorResult, ConfigSection, DEFAULT_DATA_DIR};

use cl_core::{DEFAULT_KEY_PREFIX, KeyPrefix, ProviderKind};
use serde::Deserialize;

/// Which provider is primary and where local entries live.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Primary provider. The local fast path is always used in addition.
    pub provider: ProviderKind,
    /// Directory for local entries, relative to the config directory unless
    /// absolute or starting with `~/`
    pub data_dir: String,
    /// Prefix of every local storage key
    pub key_prefix: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            data_dir: String::from(DEFAULT_DATA_DIR),
            key_prefix: String::from(DEFAULT_KEY_PREFIX),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::invalid(
                ConfigSection::Storage,
                "data_dir cannot be empty",
            ));
        }

        self.key_prefix()?;

        Ok(())
    }

    pub fn key_prefix(&self) -> ConfigErrorResult<KeyPrefix> {
        KeyPrefix::new(self.key_prefix.as_str())
            .map_err(|e| ConfigError::invalid(ConfigSection::Storage, format!("key_prefix: {e}")))
    }
}
