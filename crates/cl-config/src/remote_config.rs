use crate::{
    ConfigError, ConfigErrorResult, ConfigSection, DEFAULT_API_BASE_URL, DEFAULT_AUTH_SCOPE,
    DEFAULT_AUTH_TIMEOUT_SECS, DEFAULT_FILE_PREFIX,
};

use std::time::Duration;

use serde::Deserialize;

// Authorization wait constraints
pub const MIN_AUTH_TIMEOUT_SECS: u64 = 1;
pub const MAX_AUTH_TIMEOUT_SECS: u64 = 60;

/// Remote file-hosting provider settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the file API (Drive v3 layout)
    pub api_base_url: String,
    /// Remote file names are `<file_prefix>_<campaign>_<user>.json`
    pub file_prefix: String,
    /// Capability requested from the authorization flow
    pub scope: String,
    /// Upper bound on waiting for the authorization flow
    pub auth_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            file_prefix: String::from(DEFAULT_FILE_PREFIX),
            scope: String::from(DEFAULT_AUTH_SCOPE),
            auth_timeout_secs: DEFAULT_AUTH_TIMEOUT_SECS,
        }
    }
}

impl RemoteConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://"))
        {
            return Err(ConfigError::invalid(
                ConfigSection::Remote,
                format!(
                    "api_base_url must be an http(s) URL, got '{}'",
                    self.api_base_url
                ),
            ));
        }

        if self.file_prefix.is_empty()
            || self
                .file_prefix
                .chars()
                .any(|c| matches!(c, '/' | '\\' | '\''))
        {
            return Err(ConfigError::invalid(
                ConfigSection::Remote,
                "file_prefix must be non-empty and cannot contain '/', '\\' or quotes",
            ));
        }

        if self.scope.trim().is_empty() {
            return Err(ConfigError::invalid(
                ConfigSection::Remote,
                "scope cannot be empty",
            ));
        }

        if self.auth_timeout_secs < MIN_AUTH_TIMEOUT_SECS
            || self.auth_timeout_secs > MAX_AUTH_TIMEOUT_SECS
        {
            return Err(ConfigError::invalid(
                ConfigSection::Remote,
                format!(
                    "auth_timeout_secs must be {}-{}, got {}",
                    MIN_AUTH_TIMEOUT_SECS, MAX_AUTH_TIMEOUT_SECS, self.auth_timeout_secs
                ),
            ));
        }

        Ok(())
    }

    pub fn auth_timeout(&self) -> Duration {
        Duration::from_secs(self.auth_timeout_secs)
    }
}
