pub mod access_token;
pub mod claims;
pub mod credential;
pub mod error;
pub mod identity_source;
pub mod local_identity;
pub mod signed_in_identity;
pub mod token_broker;
pub mod token_source;

pub use access_token::AccessToken;
pub use claims::CredentialClaims;
pub use credential::decode_credential;
pub use error::{AuthError, Result};
pub use identity_source::IdentitySource;
pub use local_identity::LocalIdentityResolver;
pub use signed_in_identity::SignedInIdentityResolver;
pub use token_broker::{TokenBroker, TokenGrant};
pub use token_source::{StaticTokenSource, TokenSource};

#[cfg(test)]
mod tests;
