use std::panic::Location;
use std::path::PathBuf;

use cl_config::ConfigError;
use cl_kv::KvError;
use cl_storage::StorageError;
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to open log file {path}: {source} {location}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to initialize logger: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("Configuration error: {source} {location}")]
    Config {
        #[source]
        source: ConfigError,
        location: ErrorLocation,
    },

    #[error("Local storage error: {source} {location}")]
    Kv {
        #[source]
        source: KvError,
        location: ErrorLocation,
    },

    #[error("Storage setup failed: {source} {location}")]
    Storage {
        #[source]
        source: StorageError,
        location: ErrorLocation,
    },
}

impl PageError {
    #[track_caller]
    pub fn log_file(path: PathBuf, source: std::io::Error) -> Self {
        Self::LogFile {
            path,
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn logger(message: impl Into<String>) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ConfigError> for PageError {
    #[track_caller]
    fn from(source: ConfigError) -> Self {
        Self::Config {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<KvError> for PageError {
    #[track_caller]
    fn from(source: KvError) -> Self {
        Self::Kv {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StorageError> for PageError {
    #[track_caller]
    fn from(source: StorageError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PageError>;
