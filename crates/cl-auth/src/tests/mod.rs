mod local_identity;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use cl_core::KeyPrefix;

pub(crate) fn test_prefix() -> KeyPrefix {
    KeyPrefix::new("test_log").unwrap()
}

/// Builds an unsigned credential around `payload`.
pub(crate) fn credential_with(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{header}.{body}.signature")
}
