//! In-process FD backend for integration tests
//!
//! Mirrors the real backend's routes, status codes and `{"detail": ...}`
//! error bodies closely enough to drive the gateway and the session store.
//! Binds to an ephemeral port on 127.0.0.1.

#![allow(dead_code)]

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use fd_manager::api::ClosureRequest;
use fd_manager::models::{
    CreateFdRequest, CreateUserRequest, FdAccount, FdStatus, InterestType, LoginRequest, Role,
    SystemConfig, SystemConfigUpdate, Tenure, User, UserProfile,
};
use fd_manager::preview::{maturity_amount, maturity_date};
use fd_manager::register::FdFilter;

pub const RECEIPT_BYTES: &[u8] = b"%PDF-1.4\n% mock receipt\n";

/// Backend state shared by the handlers
#[derive(Default)]
pub struct Backend {
    sessions: Mutex<HashMap<String, UserProfile>>,
    fds: Mutex<Vec<FdAccount>>,
    config: Mutex<SystemConfig>,
    users: Mutex<Vec<(User, String)>>,
    next_id: AtomicU64,
    /// Requests seen, as `METHOD path`
    requests: Mutex<Vec<String>>,
    /// Hold `GET /fd` until the client gives up
    pub stall_list: AtomicBool,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl Backend {
    fn seeded() -> Self {
        let backend = Backend::default();
        *lock(&backend.users) = vec![
            (
                User {
                    id: 1,
                    username: "admin".to_string(),
                    role: Role::Supervisor,
                    created_at: Some("2025-01-01T00:00:00".to_string()),
                },
                "admin123".to_string(),
            ),
            (
                User {
                    id: 2,
                    username: "officer1".to_string(),
                    role: Role::Officer,
                    created_at: Some("2025-01-01T00:00:00".to_string()),
                },
                "officer123".to_string(),
            ),
        ];
        backend
    }

    fn record(&self, line: String) {
        lock(&self.requests).push(line);
    }

    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    /// Invalidate every session, as a backend restart would
    pub fn expire_sessions(&self) {
        lock(&self.sessions).clear();
    }

    pub fn session_count(&self) -> usize {
        lock(&self.sessions).len()
    }

    /// Insert an account directly, bypassing validation
    pub fn insert_fd(&self, fd: FdAccount) {
        lock(&self.fds).insert(0, fd);
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<UserProfile, Response> {
        let token = headers
            .get("x-session-token")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();
        lock(&self.sessions)
            .get(token)
            .cloned()
            .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Invalid or expired session. Please log in."))
    }

    fn supervisor(&self, headers: &HeaderMap) -> Result<UserProfile, Response> {
        let user = self.authenticate(headers)?;
        if user.role == Role::Supervisor {
            Ok(user)
        } else {
            Err(detail(StatusCode::FORBIDDEN, "Supervisor access required."))
        }
    }
}

/// A running mock backend
pub struct MockServer {
    pub base_url: String,
    pub backend: Arc<Backend>,
}

pub async fn spawn() -> MockServer {
    let backend = Arc::new(Backend::seeded());
    let router = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .route("/fd", get(list_fds).post(create_fd))
        .route("/fd/:fd_no", get(get_fd))
        .route("/fd/:fd_no/simulate-closure", post(simulate_closure))
        .route("/fd/:fd_no/close", post(close_fd))
        .route("/fd/:fd_no/mature", post(mature_fd))
        .route("/fd/:fd_no/receipt", get(receipt))
        .route("/config", get(get_config).put(update_config))
        .route("/users", get(list_users).post(create_user))
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    MockServer {
        base_url: format!("http://{}", addr),
        backend,
    }
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

type Handled = Result<Response, Response>;

async fn login(State(backend): State<Arc<Backend>>, Json(req): Json<LoginRequest>) -> Handled {
    backend.record("POST /auth/login".to_string());
    let user = lock(&backend.users)
        .iter()
        .find(|(u, password)| u.username == req.username && *password == req.password)
        .map(|(u, _)| u.clone())
        .ok_or_else(|| detail(StatusCode::UNAUTHORIZED, "Invalid username or password."))?;

    let token = format!("session-{}", backend.next_id.fetch_add(1, Ordering::SeqCst));
    lock(&backend.sessions).insert(
        token.clone(),
        UserProfile {
            username: user.username.clone(),
            role: user.role,
            user_id: Some(user.id),
        },
    );

    Ok(Json(json!({
        "message": "Login successful.",
        "session_token": token,
        "username": user.username,
        "role": user.role,
        "note": "Pass session_token in the X-Session-Token header for all subsequent requests."
    }))
    .into_response())
}

async fn logout(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Handled {
    backend.record("POST /auth/logout".to_string());
    let token = headers
        .get("x-session-token")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    match lock(&backend.sessions).remove(token) {
        Some(_) => Ok(Json(json!({ "message": "Logged out successfully." })).into_response()),
        None => Err(detail(StatusCode::BAD_REQUEST, "Session not found or already expired.")),
    }
}

async fn me(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Handled {
    backend.record("GET /auth/me".to_string());
    let user = backend.authenticate(&headers)?;
    Ok(Json(user).into_response())
}

async fn list_fds(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Query(filter): Query<FdFilter>,
) -> Handled {
    backend.record("GET /fd".to_string());
    backend.authenticate(&headers)?;
    if backend.stall_list.load(Ordering::SeqCst) {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }

    let fds = lock(&backend.fds);
    let rows: Vec<Value> = filter
        .apply(&fds)
        .into_iter()
        .map(|fd| {
            // The register sends a preformatted tenure instead of value/unit
            let mut row = serde_json::to_value(fd).unwrap_or_default();
            if let Some(obj) = row.as_object_mut() {
                obj.remove("tenure_value");
                obj.remove("tenure_unit");
                obj.insert("tenure".to_string(), json!(fd.tenure_label()));
            }
            row
        })
        .collect();
    Ok(Json(json!({ "total": rows.len(), "fd_accounts": rows })).into_response())
}

async fn create_fd(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(req): Json<CreateFdRequest>,
) -> Handled {
    backend.record("POST /fd".to_string());
    let user = backend.authenticate(&headers)?;

    let mut problems = Vec::new();
    if req.deposit_amount <= 0.0 {
        problems.push(json!({ "loc": ["body", "deposit_amount"], "msg": "Input should be greater than 0" }));
    }
    if req.interest_rate <= 0.0 || req.interest_rate > 20.0 {
        problems.push(json!({ "loc": ["body", "interest_rate"], "msg": "Input should be less than or equal to 20" }));
    }
    if !problems.is_empty() {
        return Err((StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": problems }))).into_response());
    }

    let interest_type = lock(&backend.config).interest_type;
    let tenure = Tenure::new(req.tenure_value, req.tenure_unit);
    let amount = maturity_amount(req.deposit_amount, req.interest_rate, tenure.as_years(), interest_type);
    let maturity = maturity_date(req.start_date, tenure)
        .ok_or_else(|| detail(StatusCode::UNPROCESSABLE_ENTITY, "Tenure out of range."))?;

    let fd_no = format!("FD{:04}", backend.next_id.fetch_add(1, Ordering::SeqCst));
    let fd = FdAccount {
        fd_no: fd_no.clone(),
        customer_name: req.customer_name.clone(),
        id_type: req.id_type,
        id_number: req.id_number.clone(),
        deposit_amount: req.deposit_amount,
        interest_rate: req.interest_rate,
        tenure_value: Some(req.tenure_value),
        tenure_unit: Some(req.tenure_unit),
        tenure: None,
        start_date: req.start_date,
        maturity_date: maturity,
        maturity_amount: round2(amount),
        interest_type: Some(interest_type),
        status: FdStatus::Active,
        created_by: Some(user.username),
        created_at: None,
        closed_at: None,
    };
    lock(&backend.fds).insert(0, fd);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "FD created successfully.",
            "fd_no": fd_no,
            "customer_name": req.customer_name,
            "deposit_amount": req.deposit_amount,
            "interest_rate": req.interest_rate,
            "tenure": tenure.to_string(),
            "start_date": req.start_date,
            "maturity_date": maturity,
            "maturity_amount": round2(amount),
            "interest_type": interest_type,
        })),
    )
        .into_response())
}

fn find(backend: &Backend, fd_no: &str) -> Result<FdAccount, Response> {
    lock(&backend.fds)
        .iter()
        .find(|fd| fd.fd_no == fd_no)
        .cloned()
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, format!("FD '{}' not found.", fd_no)))
}

async fn get_fd(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(fd_no): Path<String>,
) -> Handled {
    backend.record(format!("GET /fd/{}", fd_no));
    backend.authenticate(&headers)?;
    if fd_no == "CRASH" {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response());
    }
    Ok(Json(find(&backend, &fd_no)?).into_response())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Premature closure figures, or the rejection the backend would send
fn closure_figures(backend: &Backend, fd: &FdAccount, closure: NaiveDate) -> Result<Value, Response> {
    if fd.status != FdStatus::Active {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            format!("FD is not Active. Current status: {}", fd.status.as_str()),
        ));
    }
    if closure <= fd.start_date {
        return Err(detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Closure date must be after the start date.",
        ));
    }
    if closure >= fd.maturity_date {
        return Err(detail(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Closure date must be before maturity date for premature closure.",
        ));
    }

    let config = lock(&backend.config).clone();
    let interest_type = fd.interest_type.unwrap_or(config.interest_type);
    let days = (closure - fd.start_date).num_days();
    let years = days as f64 / 365.25;
    let accrued = maturity_amount(fd.deposit_amount, fd.interest_rate, years, interest_type) - fd.deposit_amount;
    let penalty = accrued * config.penalty_percent / 100.0;
    let net_interest = accrued - penalty;

    Ok(json!({
        "fd_no": fd.fd_no,
        "customer_name": fd.customer_name,
        "principal": fd.deposit_amount,
        "original_maturity_date": fd.maturity_date,
        "simulated_closure_date": closure,
        "days_held": days,
        "years_held": (years * 10000.0).round() / 10000.0,
        "accrued_interest": round2(accrued),
        "penalty_percent": config.penalty_percent.to_string(),
        "penalty_amount": round2(penalty),
        "net_interest": round2(net_interest),
        "net_payout": round2(fd.deposit_amount + net_interest),
        "interest_type": interest_type,
        "note": "This is a simulation only. No actual closure has been performed."
    }))
}

async fn simulate_closure(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(fd_no): Path<String>,
    Json(req): Json<ClosureRequest>,
) -> Handled {
    backend.record(format!("POST /fd/{}/simulate-closure", fd_no));
    backend.authenticate(&headers)?;
    let fd = find(&backend, &fd_no)?;
    Ok(Json(closure_figures(&backend, &fd, req.closure_date)?).into_response())
}

async fn close_fd(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(fd_no): Path<String>,
    Json(req): Json<ClosureRequest>,
) -> Handled {
    backend.record(format!("POST /fd/{}/close", fd_no));
    backend.authenticate(&headers)?;
    let fd = find(&backend, &fd_no)?;
    if fd.status != FdStatus::Active {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            format!("FD is already {}.", fd.status.as_str()),
        ));
    }
    closure_figures(&backend, &fd, req.closure_date)?;

    let mut fds = lock(&backend.fds);
    if let Some(stored) = fds.iter_mut().find(|f| f.fd_no == fd_no) {
        stored.status = FdStatus::PrematurelyClosed;
        stored.closed_at = Some(req.closure_date.to_string());
    }
    Ok(Json(json!({
        "message": format!("FD {} marked as PrematurelyClosed on {}.", fd_no, req.closure_date)
    }))
    .into_response())
}

async fn mature_fd(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(fd_no): Path<String>,
) -> Handled {
    backend.record(format!("POST /fd/{}/mature", fd_no));
    backend.authenticate(&headers)?;
    let fd = find(&backend, &fd_no)?;
    if fd.status != FdStatus::Active {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            format!("FD is already {}.", fd.status.as_str()),
        ));
    }
    if fd.maturity_date > Local::now().date_naive() {
        return Err(detail(StatusCode::BAD_REQUEST, "Maturity date has not been reached yet."));
    }

    let mut fds = lock(&backend.fds);
    if let Some(stored) = fds.iter_mut().find(|f| f.fd_no == fd_no) {
        stored.status = FdStatus::Closed;
    }
    Ok(Json(json!({ "message": format!("FD {} marked as Closed.", fd_no) })).into_response())
}

async fn receipt(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Path(fd_no): Path<String>,
) -> Handled {
    backend.record(format!("GET /fd/{}/receipt", fd_no));
    backend.authenticate(&headers)?;
    find(&backend, &fd_no)?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=FD_Receipt_{}.pdf", fd_no),
            ),
        ],
        RECEIPT_BYTES,
    )
        .into_response())
}

async fn get_config(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Handled {
    backend.record("GET /config".to_string());
    backend.authenticate(&headers)?;
    let config = lock(&backend.config).clone();
    // Stored as strings by the backend
    Ok(Json(json!({
        "interest_type": config.interest_type,
        "penalty_percent": config.penalty_percent.to_string(),
        "default_rate_12m": config.default_rate_12m.to_string(),
        "default_rate_24m": config.default_rate_24m.to_string(),
        "default_rate_36m": config.default_rate_36m.to_string(),
    }))
    .into_response())
}

async fn update_config(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(update): Json<SystemConfigUpdate>,
) -> Handled {
    backend.record("PUT /config".to_string());
    backend.supervisor(&headers)?;

    let mut updated_fields = Vec::new();
    if update.interest_type.is_some() {
        updated_fields.push("interest_type");
    }
    if update.penalty_percent.is_some() {
        updated_fields.push("penalty_percent");
    }
    if update.default_rate_12m.is_some() {
        updated_fields.push("default_rate_12m");
    }
    if update.default_rate_24m.is_some() {
        updated_fields.push("default_rate_24m");
    }
    if update.default_rate_36m.is_some() {
        updated_fields.push("default_rate_36m");
    }
    update.apply_to(&mut lock(&backend.config));

    Ok(Json(json!({ "message": "Configuration updated.", "updated_fields": updated_fields })).into_response())
}

async fn list_users(State(backend): State<Arc<Backend>>, headers: HeaderMap) -> Handled {
    backend.record("GET /users".to_string());
    backend.supervisor(&headers)?;
    let users: Vec<User> = lock(&backend.users).iter().map(|(u, _)| u.clone()).collect();
    Ok(Json(users).into_response())
}

async fn create_user(
    State(backend): State<Arc<Backend>>,
    headers: HeaderMap,
    Json(req): Json<CreateUserRequest>,
) -> Handled {
    backend.record("POST /users".to_string());
    backend.supervisor(&headers)?;

    let mut users = lock(&backend.users);
    if users.iter().any(|(u, _)| u.username == req.username) {
        return Err(detail(
            StatusCode::CONFLICT,
            format!("Username '{}' already exists.", req.username),
        ));
    }
    let id = users.len() as i64 + 1;
    users.push((
        User {
            id,
            username: req.username.clone(),
            role: req.role,
            created_at: None,
        },
        req.password,
    ));

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("User '{}' created with role '{}'.", req.username, req.role.as_str())
        })),
    )
        .into_response())
}

/// Convenience constructor for directly inserted accounts
pub fn account(fd_no: &str, customer: &str, start: NaiveDate, maturity: NaiveDate, amount: f64) -> FdAccount {
    FdAccount {
        fd_no: fd_no.to_string(),
        customer_name: customer.to_string(),
        id_type: Default::default(),
        id_number: "1234-5678-9012".to_string(),
        deposit_amount: amount,
        interest_rate: 7.0,
        tenure_value: Some(12),
        tenure_unit: Some(Default::default()),
        tenure: None,
        start_date: start,
        maturity_date: maturity,
        maturity_amount: round2(amount * 1.07),
        interest_type: Some(InterestType::Compound),
        status: FdStatus::Active,
        created_by: Some("officer1".to_string()),
        created_at: None,
        closed_at: None,
    }
}
