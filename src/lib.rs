//! # FD Manager
//!
//! Client core for a Fixed Deposit management system: the pieces a front end
//! needs to talk to the FD backend and present its data.
//!
//! ## Features
//!
//! - **Gateway**: one trait for every backend call, with session header
//!   injection, error normalization and cancellable requests
//! - **Session**: restore, login and logout over a watch channel, with a
//!   pluggable token store
//! - **Guards**: authenticated and supervisor-only routes
//! - **Maturity preview**: simple and compound interest estimates while an FD
//!   is being filled in
//! - **Register**: client-side filtering and dashboard totals
//!
//! ## Modules
//!
//! - [`api`]: Backend gateway, errors and request scopes
//! - [`session`]: Session state and token persistence
//! - [`guard`]: Route table and access decisions
//! - [`preview`]: Maturity calculator
//! - [`closure`]: Premature closure workflow
//! - [`register`]: FD list filtering and dashboard aggregates
//! - [`forms`]: Field-level validation for every form
//! - [`cli`], [`config`]: Terminal front end (`client` feature)
//!
//! The `client` feature (default) adds the reqwest gateway and the `fdctl`
//! binary. Without it the crate builds for `wasm32` and backs the browser
//! front end.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fd_manager::api::client::{ApiClient, ApiClientConfig};
//! use fd_manager::api::FdApi;
//! use fd_manager::session::{FileTokenStore, SessionStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = Arc::new(ApiClient::new(ApiClientConfig::default())?);
//!     let store = SessionStore::new(api, FileTokenStore::new("session.json"));
//!
//!     // Pick up a saved session, or log in
//!     if !store.restore().await.is_authenticated() {
//!         store.login("officer1", "officer123").await?;
//!     }
//!
//!     let list = store.api().list_fds(None).await?;
//!     println!("{} FDs on record", list.total);
//!     Ok(())
//! }
//! ```

pub mod api;
#[cfg(feature = "client")]
pub mod cli;
pub mod closure;
#[cfg(feature = "client")]
pub mod config;
pub mod display;
pub mod forms;
pub mod guard;
pub mod models;
pub mod preview;
pub mod register;
pub mod session;

// Re-export top-level types for convenience
pub use api::{ApiError, ApiResult, FdApi, RequestScope};

pub use session::{AuthError, Session, SessionState, SessionStore, TokenStore};

pub use guard::{evaluate, Gate, GuardDecision, Route};

pub use preview::{compute_preview, Preview, PreviewInputs};

pub use register::{DashboardStats, FdFilter, RegisterView};

pub use models::{FdAccount, FdStatus, InterestType, Role, SystemConfig, Tenure, TenureUnit, UserProfile};

#[cfg(feature = "client")]
pub use config::{Config, ConfigError};
