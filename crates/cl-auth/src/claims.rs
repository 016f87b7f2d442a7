use crate::{AuthError, Result as AuthErrorResult};

use cl_core::UserIdentity;
use serde::{Deserialize, Serialize};

const FALLBACK_DISPLAY_NAME: &str = "User";

/// Profile claims carried by a sign-in credential.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CredentialClaims {
    /// Subject (stable user id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub given_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

impl CredentialClaims {
    /// Claims identify a user if they carry a subject or an email.
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if non_empty(&self.sub).is_none() && non_empty(&self.email).is_none() {
            return Err(AuthError::invalid_claim(
                "sub",
                "credential carries neither sub nor email",
            ));
        }

        Ok(())
    }

    /// Subject when present, else email.
    pub fn user_id(&self) -> Option<&str> {
        non_empty(&self.sub).or_else(|| non_empty(&self.email))
    }

    pub fn display_name(&self) -> &str {
        non_empty(&self.name)
            .or_else(|| non_empty(&self.given_name))
            .unwrap_or(FALLBACK_DISPLAY_NAME)
    }

    pub fn to_identity(&self) -> Option<UserIdentity> {
        let id = self.user_id()?;
        let identity = UserIdentity::new(id, self.display_name());

        Some(match non_empty(&self.email) {
            Some(email) => identity.with_email(email),
            None => identity,
        })
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
