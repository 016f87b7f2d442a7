use crate::{AuthError, CredentialClaims, Result as AuthErrorResult};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Decodes the payload segment of a JWT sign-in credential into claims.
///
/// The signature is not verified: the credential arrives from the sign-in
/// widget on the same device and only scopes local data.
#[track_caller]
pub fn decode_credential(credential: &str) -> AuthErrorResult<CredentialClaims> {
    let mut segments = credential.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(AuthError::invalid_credential(
            "expected three dot-separated segments",
        ));
    };

    // Some issuers pad the payload; the no-pad engine rejects '='.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let claims: CredentialClaims = serde_json::from_slice(&bytes)?;
    claims.validate()?;

    Ok(claims)
}
