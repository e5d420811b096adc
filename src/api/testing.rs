//! In-memory gateway for unit tests
//!
//! Knows the two seeded accounts (`admin` / `admin123` as supervisor,
//! `officer1` / `officer123` as officer), issues session tokens, and can be
//! switched offline or told to fail logout.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use super::{ApiError, ApiResult, FdApi};
use crate::models::{
    ActionMessage, ClosureSimulation, ConfigUpdated, CreateFdRequest, CreateFdResponse,
    CreateUserRequest, FdAccount, FdList, LoginResponse, Role, SystemConfig, SystemConfigUpdate,
    User, UserProfile,
};
use crate::register::FdFilter;

pub(crate) struct StubApi {
    token: Mutex<Option<String>>,
    sessions: Mutex<HashMap<String, UserProfile>>,
    calls: Mutex<Vec<&'static str>>,
    next_token: AtomicU64,
    offline: AtomicBool,
    logout_fails: AtomicBool,
}

fn seeded_user(username: &str, password: Option<&str>) -> Option<UserProfile> {
    let (expected, role, id) = match username {
        "admin" => ("admin123", Role::Supervisor, 1),
        "officer1" => ("officer123", Role::Officer, 2),
        _ => return None,
    };
    if password.map_or(true, |p| p == expected) {
        Some(UserProfile {
            username: username.to_string(),
            role,
            user_id: Some(id),
        })
    } else {
        None
    }
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            token: Mutex::new(None),
            sessions: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            next_token: AtomicU64::new(1),
            offline: AtomicBool::new(false),
            logout_fails: AtomicBool::new(false),
        }
    }

    /// Open a server-side session for a seeded user without logging in
    pub fn issue_token(&self, username: &str) -> String {
        let token = format!("token-{}", self.next_token.fetch_add(1, Ordering::SeqCst));
        if let Some(profile) = seeded_user(username, None) {
            self.sessions.lock().unwrap().insert(token.clone(), profile);
        }
        token
    }

    /// Forget a session server-side, as if it expired
    pub fn expire(&self, token: &str) {
        self.sessions.lock().unwrap().remove(token);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn set_logout_fails(&self, fails: bool) {
        self.logout_fails.store(fails, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn enter(&self, call: &'static str) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        if self.offline.load(Ordering::SeqCst) {
            Err(ApiError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }

    fn authenticated(&self) -> ApiResult<UserProfile> {
        let token = self.token.lock().unwrap().clone();
        token
            .and_then(|t| self.sessions.lock().unwrap().get(&t).cloned())
            .ok_or_else(|| ApiError::Unauthorized {
                message: "Invalid or expired session. Please log in.".to_string(),
            })
    }

    fn unsupported<T>(&self) -> ApiResult<T> {
        Err(ApiError::Rejected {
            status: 501,
            message: "Not supported by stub".to_string(),
        })
    }
}

#[async_trait]
impl FdApi for StubApi {
    fn set_token(&self, token: Option<String>) {
        *self.token.lock().unwrap() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    async fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        self.enter("login")?;
        let profile = seeded_user(username, Some(password)).ok_or_else(|| {
            ApiError::Unauthorized {
                message: "Invalid username or password.".to_string(),
            }
        })?;
        let token = self.issue_token(username);
        Ok(LoginResponse {
            session_token: token,
            username: profile.username,
            role: profile.role,
            user_id: None,
        })
    }

    async fn logout(&self) -> ApiResult<ActionMessage> {
        self.enter("logout")?;
        if self.logout_fails.load(Ordering::SeqCst) {
            return Err(ApiError::Rejected {
                status: 500,
                message: "HTTP 500".to_string(),
            });
        }
        let token = self.token.lock().unwrap().clone().unwrap_or_default();
        match self.sessions.lock().unwrap().remove(&token) {
            Some(_) => Ok(ActionMessage {
                message: "Logged out successfully.".to_string(),
            }),
            None => Err(ApiError::Rejected {
                status: 400,
                message: "Session not found or already expired.".to_string(),
            }),
        }
    }

    async fn current_user(&self) -> ApiResult<UserProfile> {
        self.enter("current_user")?;
        self.authenticated()
    }

    async fn create_fd(&self, _request: &CreateFdRequest) -> ApiResult<CreateFdResponse> {
        self.enter("create_fd")?;
        self.unsupported()
    }

    async fn list_fds(&self, _filter: Option<&FdFilter>) -> ApiResult<FdList> {
        self.enter("list_fds")?;
        self.authenticated()?;
        Ok(FdList::default())
    }

    async fn get_fd(&self, _fd_no: &str) -> ApiResult<FdAccount> {
        self.enter("get_fd")?;
        self.unsupported()
    }

    async fn simulate_closure(
        &self,
        fd_no: &str,
        closure_date: NaiveDate,
    ) -> ApiResult<ClosureSimulation> {
        self.enter("simulate_closure")?;
        self.authenticated()?;
        Ok(ClosureSimulation {
            fd_no: fd_no.to_string(),
            customer_name: String::new(),
            principal: 100000.0,
            original_maturity_date: None,
            simulated_closure_date: Some(closure_date),
            days_held: 184,
            years_held: 0.5038,
            accrued_interest: 3710.2,
            penalty_percent: 1.0,
            penalty_amount: 37.1,
            net_interest: 3673.1,
            net_payout: 103673.1,
            interest_type: None,
            note: Some("This is a simulation only. No actual closure has been performed.".to_string()),
        })
    }

    async fn close_fd(&self, fd_no: &str, closure_date: NaiveDate) -> ApiResult<ActionMessage> {
        self.enter("close_fd")?;
        self.authenticated()?;
        Ok(ActionMessage {
            message: format!("FD {} marked as PrematurelyClosed on {}.", fd_no, closure_date),
        })
    }

    async fn mature_fd(&self, _fd_no: &str) -> ApiResult<ActionMessage> {
        self.enter("mature_fd")?;
        self.unsupported()
    }

    async fn download_receipt(&self, _fd_no: &str) -> ApiResult<Vec<u8>> {
        self.enter("download_receipt")?;
        self.unsupported()
    }

    async fn get_config(&self) -> ApiResult<SystemConfig> {
        self.enter("get_config")?;
        self.authenticated()?;
        Ok(SystemConfig::default())
    }

    async fn update_config(&self, _update: &SystemConfigUpdate) -> ApiResult<ConfigUpdated> {
        self.enter("update_config")?;
        self.unsupported()
    }

    async fn list_users(&self) -> ApiResult<Vec<User>> {
        self.enter("list_users")?;
        self.unsupported()
    }

    async fn create_user(&self, _request: &CreateUserRequest) -> ApiResult<ActionMessage> {
        self.enter("create_user")?;
        self.unsupported()
    }
}
