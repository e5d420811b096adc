//! Users and roles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Access level of a user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates and services FDs
    #[default]
    Officer,
    /// Officer rights plus configuration and user management
    Supervisor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Officer => "officer",
            Role::Supervisor => "supervisor",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Officer => "Officer",
            Role::Supervisor => "Supervisor",
        }
    }

    pub fn is_supervisor(&self) -> bool {
        matches!(self, Role::Supervisor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "officer" => Ok(Role::Officer),
            "supervisor" => Ok(Role::Supervisor),
            _ => Err(format!("Unknown role: {}. Use: officer, supervisor", s)),
        }
    }
}

/// A row of `GET /users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Identity of the logged-in user, as returned by `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl UserProfile {
    pub fn is_supervisor(&self) -> bool {
        self.role.is_supervisor()
    }
}

/// Body returned by `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub session_token: String,
    pub username: String,
    pub role: Role,
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl LoginResponse {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            role: self.role,
            user_id: self.user_id,
        }
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /users`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
}
