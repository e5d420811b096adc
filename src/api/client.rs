//! FD Backend REST Client
//!
//! Native [`FdApi`] implementation over `reqwest`. No retries: a failed
//! request is reported once and the caller decides what to do.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::Instrument;
use uuid::Uuid;

use super::error::{ApiError, ApiResult};
use super::{paths, ClosureRequest, FdApi, DEFAULT_BASE_URL, SESSION_HEADER};
use crate::models::{
    ActionMessage, ClosureSimulation, ConfigUpdated, CreateFdRequest, CreateFdResponse,
    CreateUserRequest, FdAccount, FdList, LoginRequest, LoginResponse, SystemConfig,
    SystemConfigUpdate, User, UserProfile,
};
use crate::register::FdFilter;

/// Configuration for the REST client
#[derive(Debug, Clone)]
pub struct ApiClientConfig {
    /// Backend base URL (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ApiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// FD backend REST client
pub struct ApiClient {
    client: Client,
    config: ApiClientConfig,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    /// Create a new client with the given configuration
    pub fn new(config: ApiClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            token: RwLock::new(None),
        })
    }

    pub fn config(&self) -> &ApiClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = paths::join(&self.config.base_url, path);
        let builder = self.client.request(method, url);
        match self.token() {
            Some(token) => builder.header(SESSION_HEADER, token),
            None => builder,
        }
    }

    /// Send a request and hand back the successful response, or the
    /// normalized error for anything else
    async fn execute(&self, method: Method, path: &str, builder: RequestBuilder) -> ApiResult<Response> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!("api_request", %request_id, %method, path);

        async move {
            let started = Instant::now();
            let response = builder.send().await.map_err(transport_error)?;
            let status = response.status();

            tracing::debug!(
                status = status.as_u16(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "response received"
            );

            if status.is_success() {
                Ok(response)
            } else {
                let body = response.text().await.unwrap_or_default();
                let err = ApiError::from_response(status.as_u16(), &body);
                tracing::debug!(error = %err, "request rejected");
                Err(err)
            }
        }
        .instrument(span)
        .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let builder = self.request(Method::GET, path);
        let response = self.execute(Method::GET, path, builder).await?;
        decode(response).await
    }

    async fn post<B, T>(&self, path: &str, body: Option<&B>) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let mut builder = self.request(Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = self.execute(Method::POST, path, builder).await?;
        decode(response).await
    }

    async fn put<B, T>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let builder = self.request(Method::PUT, path).json(body);
        let response = self.execute(Method::PUT, path, builder).await?;
        decode(response).await
    }
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Network("Request timed out".to_string())
    } else if e.is_connect() {
        ApiError::Network(format!("Could not connect to server: {}", e))
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

#[async_trait]
impl FdApi for ApiClient {
    fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
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
        let builder = self.request(Method::GET, &path);
        let response = self.execute(Method::GET, &path, builder).await?;
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(bytes.to_vec())
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiClientConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn test_token_slot() {
        let client = ApiClient::new(ApiClientConfig::default()).unwrap();
        assert_eq!(client.token(), None);

        client.set_token(Some("abc".to_string()));
        assert_eq!(client.token(), Some("abc".to_string()));

        client.set_token(None);
        assert_eq!(client.token(), None);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_a_network_error() {
        let client = ApiClient::new(ApiClientConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            request_timeout_secs: 2,
        })
        .unwrap();

        let err = client.current_user().await.unwrap_err();
        assert!(err.is_network(), "unexpected error: {:?}", err);
    }
}
