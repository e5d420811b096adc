//! Domain Models
//!
//! Types exchanged with the FD backend. The backend owns the authoritative
//! definitions; these mirror what the client reads and writes.
//!
//! - [`fd`]: FD accounts, tenure, status and closure simulations
//! - [`config`]: the global system configuration singleton
//! - [`user`]: users, roles and session profiles

pub mod config;
pub mod fd;
pub mod user;

pub use config::{ConfigUpdated, SystemConfig, SystemConfigUpdate};
pub use fd::{
    receipt_file_name, ActionMessage, ClosureSimulation, CreateFdRequest, CreateFdResponse,
    FdAccount, FdList, FdStatus, IdType, InterestType, Tenure, TenureUnit,
};
pub use user::{CreateUserRequest, LoginRequest, LoginResponse, Role, User, UserProfile};

/// Serde helpers for backend quirks
pub(crate) mod de {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        Text(String),
    }

    /// Accept `7.5` as well as `"7.5"`; the config table stores values as text.
    pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| serde::de::Error::custom(format!("invalid number {:?}: {}", s, e))),
        }
    }
}
