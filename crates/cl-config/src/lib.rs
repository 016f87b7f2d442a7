mod config;
mod error;
mod log_level;
mod logging_config;
mod page_config;
mod remote_config;
mod storage_config;

pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult, ConfigSection};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use page_config::PageConfig;
pub use remote_config::RemoteConfig;
pub use storage_config::StorageConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "CL_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".campaign-log";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com";
const DEFAULT_FILE_PREFIX: &str = "CampaignLog";
const DEFAULT_AUTH_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";
const DEFAULT_AUTH_TIMEOUT_SECS: u64 = 10;
const DEFAULT_STATUS_DISMISS_MS: u64 = 3000;
const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
