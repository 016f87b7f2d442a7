use crate::{AccessToken, Result as AuthErrorResult};

use async_trait::async_trait;

/// External authorization flow that issues bearer tokens for one scope.
///
/// Implementations may wait on user interaction; callers bound the wait.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn request_access_token(&self, scope: &str) -> AuthErrorResult<AccessToken>;
}

/// Token issued ahead of time, e.g. by a service account or a test.
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: AccessToken,
}

impl StaticTokenSource {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: AccessToken::new(token),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn request_access_token(&self, _scope: &str) -> AuthErrorResult<AccessToken> {
        Ok(self.token.clone())
    }
}
