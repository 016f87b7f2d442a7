use crate::{AccessToken, AuthError, Result as AuthErrorResult, TokenSource};

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::sync::watch;

#[derive(Debug, Clone)]
enum GrantState {
    Pending,
    Granted(AccessToken),
    Denied(String),
}

/// Bridges an interactive authorization flow to [`TokenSource`].
///
/// The provider side awaits a token; the UI side answers through the paired
/// [`TokenGrant`] once the user completes or dismisses the consent prompt.
pub struct TokenBroker {
    state: watch::Receiver<GrantState>,
    requests: Arc<AtomicU64>,
}

/// UI half of a [`TokenBroker`].
#[derive(Clone)]
pub struct TokenGrant {
    state: Arc<watch::Sender<GrantState>>,
    requests: Arc<AtomicU64>,
}

impl TokenBroker {
    pub fn new() -> (Self, TokenGrant) {
        let (tx, rx) = watch::channel(GrantState::Pending);
        let requests = Arc::new(AtomicU64::new(0));

        (
            Self {
                state: rx,
                requests: Arc::clone(&requests),
            },
            TokenGrant {
                state: Arc::new(tx),
                requests,
            },
        )
    }
}

#[async_trait]
impl TokenSource for TokenBroker {
    async fn request_access_token(&self, scope: &str) -> AuthErrorResult<AccessToken> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        debug!("Access token requested for scope {scope}");

        let mut rx = self.state.clone();
        let state = {
            let answered = rx
                .wait_for(|s| !matches!(s, GrantState::Pending))
                .await
                .map_err(|_| AuthError::authorization_closed())?;
            answered.clone()
        };

        match state {
            GrantState::Granted(token) => Ok(token),
            GrantState::Denied(reason) => Err(AuthError::authorization_failed(reason)),
            GrantState::Pending => Err(AuthError::authorization_closed()),
        }
    }
}

impl TokenGrant {
    /// Completes pending and future requests with `token`.
    pub fn deliver(&self, token: impl Into<String>) {
        info!("Access token granted");
        self.state
            .send_replace(GrantState::Granted(AccessToken::new(token)));
    }

    /// Fails pending and future requests until a token is delivered.
    pub fn deny(&self, reason: impl Into<String>) {
        let reason = reason.into();
        warn!("Access token denied: {reason}");
        self.state.send_replace(GrantState::Denied(reason));
    }

    /// Returns to the unanswered state, e.g. after sign-out.
    pub fn revoke(&self) {
        self.state.send_replace(GrantState::Pending);
    }

    /// Number of token requests seen so far.
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::SeqCst)
    }
}
