use crate::{ConfigError, ConfigErrorResult, ConfigSection, DEFAULT_STATUS_DISMISS_MS};

use std::time::Duration;

use serde::Deserialize;

// Status banner constraints
pub const MIN_STATUS_DISMISS_MS: u64 = 500;
pub const MAX_STATUS_DISMISS_MS: u64 = 30_000;

/// Page controller presentation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// How long a status banner stays up before it is dismissed
    pub status_dismiss_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            status_dismiss_ms: DEFAULT_STATUS_DISMISS_MS,
        }
    }
}

impl PageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.status_dismiss_ms < MIN_STATUS_DISMISS_MS
            || self.status_dismiss_ms > MAX_STATUS_DISMISS_MS
        {
            return Err(ConfigError::invalid(
                ConfigSection::Page,
                format!(
                    "status_dismiss_ms must be {}-{}, got {}",
                    MIN_STATUS_DISMISS_MS, MAX_STATUS_DISMISS_MS, self.status_dismiss_ms
                ),
            ));
        }

        Ok(())
    }

    pub fn status_dismiss(&self) -> Duration {
        Duration::from_millis(self.status_dismiss_ms)
    }
}
