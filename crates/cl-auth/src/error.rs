use std::panic::Location;

use cl_kv::KvError;
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid credential: {message} {location}")]
    InvalidCredential {
        message: String,
        location: ErrorLocation,
    },

    #[error("Credential payload is not valid base64url: {source} {location}")]
    CredentialEncoding {
        #[source]
        source: base64::DecodeError,
        location: ErrorLocation,
    },

    #[error("Credential claims could not be parsed: {source} {location}")]
    ClaimsParse {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity storage failed: {source} {location}")]
    Storage {
        #[source]
        source: KvError,
        location: ErrorLocation,
    },

    #[error("Authorization flow failed: {message} {location}")]
    AuthorizationFailed {
        message: String,
        location: ErrorLocation,
    },

    #[error("Authorization flow closed before a token was issued {location}")]
    AuthorizationClosed { location: ErrorLocation },
}

impl AuthError {
    #[track_caller]
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::InvalidCredential {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_claim(claim: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidClaim {
            claim: claim.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn authorization_failed(message: impl Into<String>) -> Self {
        Self::AuthorizationFailed {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn authorization_closed() -> Self {
        Self::AuthorizationClosed {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<KvError> for AuthError {
    #[track_caller]
    fn from(source: KvError) -> Self {
        Self::Storage {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<base64::DecodeError> for AuthError {
    #[track_caller]
    fn from(source: base64::DecodeError) -> Self {
        Self::CredentialEncoding {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for AuthError {
    #[track_caller]
    fn from(source: serde_json::Error) -> Self {
        Self::ClaimsParse {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
