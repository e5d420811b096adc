//! HTTP API Client
//!
//! [`FdApi`] over the browser's `fetch`, via `gloo-net`. Paths, headers and
//! error normalization come from the `fd-manager` core so both front ends
//! agree on the wire format.

use async_trait::async_trait;
use chrono::NaiveDate;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;

use fd_manager::api::{paths, ApiError, ApiResult, ClosureRequest, FdApi, DEFAULT_BASE_URL, SESSION_HEADER};
use fd_manager::models::{
    ActionMessage, ClosureSimulation, ConfigUpdated, CreateFdRequest, CreateFdResponse,
    CreateUserRequest, FdAccount, FdList, LoginRequest, LoginResponse, SystemConfig,
    SystemConfigUpdate, User, UserProfile,
};
use fd_manager::register::FdFilter;

/// `localStorage` key holding a custom backend URL
const API_URL_KEY: &str = "fd_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(API_URL_KEY, url);
    }
}

/// Gateway used by every page
pub struct GlooApi {
    base_url: String,
    token: RefCell<Option<String>>,
}

impl GlooApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: RefCell::new(None),
        }
    }

    fn with_session(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => builder.header(SESSION_HEADER, &token),
            None => builder,
        }
    }

    fn url(&self, path: &str) -> String {
        paths::join(&self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.with_session(Request::get(&self.url(path)));
        decode(execute(path, builder.send().await).await?).await
    }

    async fn post<B, T>(&self, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.with_session(Request::post(&self.url(path)));
        let request = match body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(execute(path, request.send().await).await?).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self
            .with_session(Request::put(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(execute(path, request.send().await).await?).await
    }
}

/// Turn a fetch outcome into the successful response or a normalized error
async fn execute(path: &str, sent: Result<Response, gloo_net::Error>) -> ApiResult<Response> {
    let response = sent.map_err(|e| ApiError::Network(e.to_string()))?;
    if response.ok() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let err = ApiError::from_response(response.status(), &body);
    web_sys::console::warn_1(&format!("{} failed: {}", path, err).into());
    Err(err)
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait(?Send)]
impl FdApi for GlooApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.borrow_mut() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post(paths::LOGIN, Some(&body)).await
    }

    async fn logout(&self) -> ApiResult<ActionMessage> {
        self.post::<(), _>(paths::LOGOUT, None).await
    }

    async fn current_user(&self) -> ApiResult<UserProfile> {
        self.get(paths::ME).await
    }

    async fn create_fd(&self, request: &CreateFdRequest) -> ApiResult<CreateFdResponse> {
        self.post(paths::FD, Some(request)).await
    }

    async fn list_fds(&self, filter: Option<&FdFilter>) -> ApiResult<FdList> {
        self.get(&paths::fd_list(filter)).await
    }

    async fn get_fd(&self, fd_no: &str) -> ApiResult<FdAccount> {
        self.get(&paths::fd(fd_no)).await
    }

    async fn simulate_closure(
        &self,
        fd_no: &str,
        closure_date: NaiveDate,
    ) -> ApiResult<ClosureSimulation> {
        let body = ClosureRequest { closure_date };
        self.post(&paths::simulate_closure(fd_no), Some(&body)).await
    }

    async fn close_fd(&self, fd_no: &str, closure_date: NaiveDate) -> ApiResult<ActionMessage> {
        let body = ClosureRequest { closure_date };
        self.post(&paths::close(fd_no), Some(&body)).await
    }

    async fn mature_fd(&self, fd_no: &str) -> ApiResult<ActionMessage> {
        self.post::<(), _>(&paths::mature(fd_no), None).await
    }

    async fn download_receipt(&self, fd_no: &str) -> ApiResult<Vec<u8>> {
        let path = paths::receipt(fd_no);
        let builder = self.with_session(Request::get(&self.url(&path)));
        let response = execute(&path, builder.send().await).await?;
        response
            .binary()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    async fn get_config(&self) -> ApiResult<SystemConfig> {
        self.get(paths::CONFIG).await
    }

    async fn update_config(&self, update: &SystemConfigUpdate) -> ApiResult<ConfigUpdated> {
        self.put(paths::CONFIG, update).await
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.get(paths::USERS).await
    }

    async fn create_user(&self, request: &CreateUserRequest) -> ApiResult<ActionMessage> {
        self.post(paths::USERS, Some(request)).await
    }
}
