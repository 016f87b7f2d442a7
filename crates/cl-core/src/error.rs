use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid campaign id '{value}': {message} {location}")]
    InvalidCampaignId {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid key prefix '{value}': {message} {location}")]
    InvalidKeyPrefix {
        value: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Record JSON error: {source} {location}")]
    Json {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Creates a Validation error at caller location.
    #[track_caller]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_campaign_id(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCampaignId {
            value: value.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_key_prefix(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidKeyPrefix {
            value: value.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for CoreError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::Json {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
