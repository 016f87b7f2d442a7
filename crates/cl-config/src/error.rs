use std::fmt;
use std::panic::Location;
use std::path::PathBuf;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error as ThisError;

/// Top-level table of `config.toml` a validation failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSection {
    Storage,
    Remote,
    Page,
    Logging,
}

impl fmt::Display for ConfigSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Storage => "storage",
            Self::Remote => "remote",
            Self::Page => "page",
            Self::Logging => "logging",
        })
    }
}

#[derive(ThisError, Debug)]
pub enum ConfigError {
    #[error("Invalid [{section}] config: {message} {location}")]
    Invalid {
        section: ConfigSection,
        message: String,
        location: ErrorLocation,
    },

    #[error("Cannot determine current working directory: {source}")]
    WorkingDir {
        #[source]
        source: std::io::Error,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Home directory not found")]
    NoHomeDir,
}

impl ConfigError {
    #[track_caller]
    pub fn invalid<S: Into<String>>(section: ConfigSection, message: S) -> Self {
        ConfigError::Invalid {
            section,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Section of an `Invalid` error.
    pub fn section(&self) -> Option<ConfigSection> {
        match self {
            ConfigError::Invalid { section, .. } => Some(*section),
            _ => None,
        }
    }
}

pub type ConfigErrorResult<T> = StdResult<T, ConfigError>;
