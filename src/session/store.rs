//! Session store
//!
//! Owns the gateway's credential and the persisted token, and publishes every
//! state change on a watch channel.

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

use super::token::TokenStore;
use super::{Session, SessionState};
use crate::api::{ApiError, FdApi};
use crate::models::UserProfile;

/// Login failures
#[derive(Error, Debug)]
pub enum AuthError {
    /// The server refused the credentials; carries its message
    #[error("{0}")]
    Rejected(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Could not persist session: {0}")]
    Storage(String),
}

/// Shared session state plus the operations that change it
pub struct SessionStore<A: ?Sized, T> {
    api: Arc<A>,
    tokens: T,
    state: watch::Sender<SessionState>,
}

impl<A, T> SessionStore<A, T>
where
    A: FdApi + ?Sized,
    T: TokenStore,
{
    /// New store in the `Restoring` state
    pub fn new(api: Arc<A>, tokens: T) -> Self {
        let (state, _) = watch::channel(SessionState::Restoring);
        Self { api, tokens, state }
    }

    /// Gateway carrying this session's credential
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    pub fn tokens(&self) -> &T {
        &self.tokens
    }

    pub fn current(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn profile(&self) -> Option<UserProfile> {
        self.state.borrow().profile().cloned()
    }

    fn publish(&self, state: SessionState) -> SessionState {
        self.state.send_replace(state.clone());
        state
    }

    fn become_anonymous(&self) -> SessionState {
        self.api.set_token(None);
        self.publish(SessionState::Anonymous)
    }

    /// Resolve the persisted token into a session. Never fails: anything
    /// short of a confirmed identity ends in `Anonymous`.
    ///
    /// A token the server rejects (401) is discarded; a token that could not
    /// be checked (network) is kept for the next attempt.
    pub async fn restore(&self) -> SessionState {
        self.publish(SessionState::Restoring);

        let token = match self.tokens.load() {
            Ok(Some(token)) => token,
            Ok(None) => return self.become_anonymous(),
            Err(e) => {
                tracing::warn!("Could not read saved session: {}", e);
                return self.become_anonymous();
            }
        };

        self.api.set_token(Some(token.clone()));
        match self.api.current_user().await {
            Ok(profile) => {
                tracing::debug!(user = %profile.username, role = %profile.role, "session restored");
                self.publish(SessionState::Authenticated(Session { token, profile }))
            }
            Err(e) => {
                if e.is_unauthorized() {
                    tracing::info!("Saved session is no longer valid");
                    if let Err(e) = self.tokens.clear() {
                        tracing::warn!("Could not discard saved session: {}", e);
                    }
                } else {
                    tracing::warn!("Session restore failed: {}", e);
                }
                self.become_anonymous()
            }
        }
    }

    /// Exchange credentials for a session and persist its token
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AuthError> {
        let response = match self.api.login(username, password).await {
            Ok(response) => response,
            Err(ApiError::Unauthorized { message }) => return Err(AuthError::Rejected(message)),
            Err(e) => return Err(e.into()),
        };

        let session = Session {
            token: response.session_token.clone(),
            profile: response.profile(),
        };

        self.tokens
            .save(&session.token)
            .map_err(|e| AuthError::Storage(e.to_string()))?;
        self.api.set_token(Some(session.token.clone()));

        tracing::info!(user = %session.profile.username, role = %session.profile.role, "logged in");
        self.publish(SessionState::Authenticated(session.clone()));
        Ok(session)
    }

    /// End the session. Local state is cleared whatever the server says.
    pub async fn logout(&self) {
        if self.api.token().is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!("Server logout failed, clearing local session anyway: {}", e);
            }
        }
        self.forget();
    }

    /// Drop the session locally, e.g. after a 401 from any request
    pub fn forget(&self) {
        if let Err(e) = self.tokens.clear() {
            tracing::warn!("Could not discard saved session: {}", e);
        }
        self.become_anonymous();
    }
}
