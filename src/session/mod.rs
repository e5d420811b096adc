//! Session
//!
//! Who is logged in. The state is a plain value published through a
//! `tokio::sync::watch` channel by [`SessionStore`]; front ends construct one
//! store and hand it to whatever needs it.
//!
//! Lifecycle: `Restoring` on startup, then `Anonymous` or `Authenticated`
//! once [`SessionStore::restore`] has asked the server who the persisted
//! token belongs to.

pub mod store;
pub mod token;

pub use store::{AuthError, SessionStore};
#[cfg(feature = "client")]
pub use token::FileTokenStore;
pub use token::{MemoryTokenStore, TokenStore, TokenStoreError};

use serde::{Deserialize, Serialize};

use crate::models::{Role, UserProfile};

/// An authenticated session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque credential sent as `X-Session-Token`
    pub token: String,
    pub profile: UserProfile,
}

impl Session {
    pub fn username(&self) -> &str {
        &self.profile.username
    }

    pub fn role(&self) -> Role {
        self.profile.role
    }

    pub fn is_supervisor(&self) -> bool {
        self.profile.is_supervisor()
    }
}

/// Current authentication state
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Startup check still running
    #[default]
    Restoring,
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn is_restoring(&self) -> bool {
        matches!(self, SessionState::Restoring)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Authenticated(session) => Some(session),
            _ => None,
        }
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.session().map(|s| &s.profile)
    }
}
