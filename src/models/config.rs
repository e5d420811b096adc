//! System configuration
//!
//! The backend keeps a single key/value table of settings. `GET /config`
//! returns every value as text, `PUT /config` accepts typed partial updates.

use serde::{Deserialize, Serialize};

use super::de::f64_lenient;
use super::fd::{InterestType, Tenure};

/// Global settings applied to every new FD and closure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SystemConfig {
    #[serde(default)]
    pub interest_type: InterestType,

    /// Percent of accrued interest withheld on premature closure
    #[serde(default = "default_penalty_percent", deserialize_with = "f64_lenient")]
    pub penalty_percent: f64,

    #[serde(default = "default_rate_12m", deserialize_with = "f64_lenient")]
    pub default_rate_12m: f64,

    #[serde(default = "default_rate_24m", deserialize_with = "f64_lenient")]
    pub default_rate_24m: f64,

    #[serde(default = "default_rate_36m", deserialize_with = "f64_lenient")]
    pub default_rate_36m: f64,
}

fn default_penalty_percent() -> f64 {
    1.0
}

fn default_rate_12m() -> f64 {
    6.5
}

fn default_rate_24m() -> f64 {
    7.0
}

fn default_rate_36m() -> f64 {
    7.5
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            interest_type: InterestType::default(),
            penalty_percent: default_penalty_percent(),
            default_rate_12m: default_rate_12m(),
            default_rate_24m: default_rate_24m(),
            default_rate_36m: default_rate_36m(),
        }
    }
}

impl SystemConfig {
    /// Suggested rate for a tenure: up to a year, up to two years, or longer
    pub fn default_rate_for(&self, tenure: Tenure) -> f64 {
        match tenure.as_months() {
            0..=12 => self.default_rate_12m,
            13..=24 => self.default_rate_24m,
            _ => self.default_rate_36m,
        }
    }
}

/// Partial update sent with `PUT /config`; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemConfigUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_type: Option<InterestType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rate_12m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rate_24m: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_rate_36m: Option<f64>,
}

impl SystemConfigUpdate {
    pub fn is_empty(&self) -> bool {
        self.interest_type.is_none()
            && self.penalty_percent.is_none()
            && self.default_rate_12m.is_none()
            && self.default_rate_24m.is_none()
            && self.default_rate_36m.is_none()
    }

    /// Apply the update to a local copy, mirroring what the server stores
    pub fn apply_to(&self, config: &mut SystemConfig) {
        if let Some(t) = self.interest_type {
            config.interest_type = t;
        }
        if let Some(v) = self.penalty_percent {
            config.penalty_percent = v;
        }
        if let Some(v) = self.default_rate_12m {
            config.default_rate_12m = v;
        }
        if let Some(v) = self.default_rate_24m {
            config.default_rate_24m = v;
        }
        if let Some(v) = self.default_rate_36m {
            config.default_rate_36m = v;
        }
    }
}

impl From<&SystemConfig> for SystemConfigUpdate {
    fn from(config: &SystemConfig) -> Self {
        Self {
            interest_type: Some(config.interest_type),
            penalty_percent: Some(config.penalty_percent),
            default_rate_12m: Some(config.default_rate_12m),
            default_rate_24m: Some(config.default_rate_24m),
            default_rate_36m: Some(config.default_rate_36m),
        }
    }
}

/// Body returned by `PUT /config`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigUpdated {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub updated_fields: Vec<String>,
}
