use crate::{
    CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError, ConfigErrorResult, ConfigSection,
    DEFAULT_CONFIG_DIR, LoggingConfig, PageConfig, RemoteConfig, StorageConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub remote: RemoteConfig,
    pub page: PageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for CL_CONFIG_DIR env var, else use ./.campaign-log/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply CL_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: CL_CONFIG_DIR env var > ./.campaign-log/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|source| ConfigError::WorkingDir { source })?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.storage.validate()?;
        self.remote.validate()?;
        self.page.validate()?;

        if let Some(file) = &self.logging.file
            && file.trim().is_empty()
        {
            return Err(ConfigError::invalid(
                ConfigSection::Logging,
                "file cannot be empty when set",
            ));
        }

        Ok(())
    }

    /// Absolute directory of the local file store.
    ///
    /// `~/` expands to the home directory; other relative paths resolve
    /// against the config directory.
    pub fn data_dir(&self) -> ConfigErrorResult<PathBuf> {
        let configured = self.storage.data_dir.as_str();

        if let Some(rest) = configured.strip_prefix("~/") {
            let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
            return Ok(home.join(rest));
        }

        let path = Path::new(configured);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }

        Ok(Self::config_dir()?.join(path))
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  storage: provider={}, data_dir={}, key_prefix={}",
            self.storage.provider, self.storage.data_dir, self.storage.key_prefix
        );
        info!(
            "  remote: api={}, file_prefix={}, auth_timeout={}s",
            self.remote.api_base_url, self.remote.file_prefix, self.remote.auth_timeout_secs
        );
        info!("  page: status_dismiss={}ms", self.page.status_dismiss_ms);
        info!(
            "  logging: {} (colored: {}, file: {})",
            *self.logging.level,
            self.logging.colored,
            self.logging.file.as_deref().unwrap_or("stdout")
        );
    }

    fn apply_env_overrides(&mut self) {
        // Storage
        Self::apply_env_parse("CL_STORAGE_PROVIDER", &mut self.storage.provider);
        Self::apply_env_string("CL_STORAGE_DATA_DIR", &mut self.storage.data_dir);
        Self::apply_env_string("CL_STORAGE_KEY_PREFIX", &mut self.storage.key_prefix);

        // Remote
        Self::apply_env_string("CL_REMOTE_API_BASE_URL", &mut self.remote.api_base_url);
        Self::apply_env_string("CL_REMOTE_FILE_PREFIX", &mut self.remote.file_prefix);
        Self::apply_env_parse(
            "CL_REMOTE_AUTH_TIMEOUT_SECS",
            &mut self.remote.auth_timeout_secs,
        );

        // Page
        Self::apply_env_parse(
            "CL_PAGE_STATUS_DISMISS_MS",
            &mut self.page.status_dismiss_ms,
        );

        // Logging
        Self::apply_env_parse("CL_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("CL_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("CL_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
