use crate::{CoreError, KEY_SEPARATOR, Result as CoreErrorResult};

pub const DEFAULT_KEY_PREFIX: &str = "campaign_log";

/// Namespace prefix shared by every local storage entry this workspace writes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPrefix(String);

impl KeyPrefix {
    #[track_caller]
    pub fn new(value: impl Into<String>) -> CoreErrorResult<Self> {
        let value = value.into();

        if value.is_empty() {
            return Err(CoreError::invalid_key_prefix(value, "cannot be empty"));
        }
        if value.contains(KEY_SEPARATOR) {
            return Err(CoreError::invalid_key_prefix(
                value,
                format!("cannot contain '{KEY_SEPARATOR}'"),
            ));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for KeyPrefix {
    fn default() -> Self {
        Self(String::from(DEFAULT_KEY_PREFIX))
    }
}

impl std::fmt::Display for KeyPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
