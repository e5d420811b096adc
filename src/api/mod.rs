//! API Gateway
//!
//! The single place where user actions become HTTP requests against the FD
//! backend. [`FdApi`] is the seam: the native [`client::ApiClient`] (reqwest)
//! implements it for the terminal front end, and the browser crate implements
//! it over `fetch`.
//!
//! Every request carries the session credential in the `X-Session-Token`
//! header when a token is held. Non-2xx responses are normalized by
//! [`ApiError::from_response`].

pub mod cancel;
#[cfg(feature = "client")]
pub mod client;
pub mod error;
#[cfg(test)]
pub(crate) mod testing;

pub use cancel::RequestScope;
pub use error::{ApiError, ApiResult};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    ActionMessage, ClosureSimulation, ConfigUpdated, CreateFdRequest, CreateFdResponse, FdAccount,
    FdList, LoginResponse, SystemConfig, SystemConfigUpdate, User, UserProfile,
};
use crate::models::CreateUserRequest;
use crate::register::FdFilter;

/// Header carrying the opaque session token
pub const SESSION_HEADER: &str = "X-Session-Token";

/// Base URL used when nothing else is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Body of the closure endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosureRequest {
    pub closure_date: NaiveDate,
}

/// Backend operations available to the front ends
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait FdApi {
    /// Replace the credential attached to subsequent requests
    fn set_token(&self, token: Option<String>);

    /// Credential currently attached, if any
    fn token(&self) -> Option<String>;

    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse>;

    async fn logout(&self) -> ApiResult<ActionMessage>;

    /// `GET /auth/me`
    async fn current_user(&self) -> ApiResult<UserProfile>;

    async fn create_fd(&self, request: &CreateFdRequest) -> ApiResult<CreateFdResponse>;

    /// `GET /fd`, optionally filtered server-side
    async fn list_fds(&self, filter: Option<&FdFilter>) -> ApiResult<FdList>;

    async fn get_fd(&self, fd_no: &str) -> ApiResult<FdAccount>;

    /// Ask the server what a premature closure on `closure_date` would pay out
    async fn simulate_closure(
        &self,
        fd_no: &str,
        closure_date: NaiveDate,
    ) -> ApiResult<ClosureSimulation>;

    async fn close_fd(&self, fd_no: &str, closure_date: NaiveDate) -> ApiResult<ActionMessage>;

    async fn mature_fd(&self, fd_no: &str) -> ApiResult<ActionMessage>;

    /// PDF receipt bytes
    async fn download_receipt(&self, fd_no: &str) -> ApiResult<Vec<u8>>;

    async fn get_config(&self) -> ApiResult<SystemConfig>;

    async fn update_config(&self, update: &SystemConfigUpdate) -> ApiResult<ConfigUpdated>;

    async fn list_users(&self) -> ApiResult<Vec<User>>;

    async fn create_user(&self, request: &CreateUserRequest) -> ApiResult<ActionMessage>;
}

/// Endpoint paths, shared by every gateway implementation
pub mod paths {
    use crate::register::FdFilter;

    pub const LOGIN: &str = "/auth/login";
    pub const LOGOUT: &str = "/auth/logout";
    pub const ME: &str = "/auth/me";
    pub const FD: &str = "/fd";
    pub const CONFIG: &str = "/config";
    pub const USERS: &str = "/users";

    pub fn fd(fd_no: &str) -> String {
        format!("/fd/{}", urlencoding::encode(fd_no))
    }

    pub fn simulate_closure(fd_no: &str) -> String {
        format!("{}/simulate-closure", fd(fd_no))
    }

    pub fn close(fd_no: &str) -> String {
        format!("{}/close", fd(fd_no))
    }

    pub fn mature(fd_no: &str) -> String {
        format!("{}/mature", fd(fd_no))
    }

    pub fn receipt(fd_no: &str) -> String {
        format!("{}/receipt", fd(fd_no))
    }

    /// `/fd` with the filter's query string, if it has any criteria
    pub fn fd_list(filter: Option<&FdFilter>) -> String {
        match filter.map(FdFilter::to_query_string) {
            Some(query) if !query.is_empty() => format!("{}?{}", FD, query),
            _ => FD.to_string(),
        }
    }

    /// Join a base URL and an absolute path without doubling the slash
    pub fn join(base_url: &str, path: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), path)
    }
}
