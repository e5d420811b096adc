//! API Error Types
//!
//! Normalizes transport failures and non-2xx responses into one error type.
//! The backend reports failures as `{"detail": ...}`; the detail is surfaced
//! to the user verbatim.

use serde_json::Value;
use thiserror::Error;

/// Gateway error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never produced a response (connection refused, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// 401: missing, invalid or expired session, or bad credentials
    #[error("{message}")]
    Unauthorized { message: String },

    /// 403: authenticated but lacking the supervisor role
    #[error("{message}")]
    Forbidden { message: String },

    /// Any other non-2xx response; business-rule rejections land here
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// The owning request scope was cancelled before a response arrived
    #[error("Request cancelled")]
    Cancelled,
}

/// Message used when an error body is not JSON at all
pub const UNPARSEABLE_BODY_MESSAGE: &str = "Request failed";

impl ApiError {
    /// Build the error for a non-2xx response from its status and raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = detail_message(status, body);
        match status {
            401 => ApiError::Unauthorized { message },
            403 => ApiError::Forbidden { message },
            _ => ApiError::Rejected { status, message },
        }
    }

    /// HTTP status, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Forbidden { .. } => Some(403),
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text to show the user
    pub fn message(&self) -> String {
        self.to_string()
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

/// Extract the user-facing message from an error body.
///
/// - not JSON: [`UNPARSEABLE_BODY_MESSAGE`]
/// - `detail` string: used as-is
/// - `detail` list of `{"msg": ...}` (request validation): joined with `"; "`
/// - anything else: `HTTP <status>`
fn detail_message(status: u16, body: &str) -> String {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(_) => return UNPARSEABLE_BODY_MESSAGE.to_string(),
    };

    match value.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                format!("HTTP {}", status)
            } else {
                messages.join("; ")
            }
        }
        _ => format!("HTTP {}", status),
    }
}

/// Result type for gateway operations
pub type ApiResult<T> = Result<T, ApiError>;
