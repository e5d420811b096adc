//! System configuration form (supervisor only)

use super::{parse_number, FieldErrors, Form};
use crate::models::{InterestType, SystemConfig, SystemConfigUpdate};

pub const INTEREST_TYPE: &str = "interest_type";
pub const PENALTY_PERCENT: &str = "penalty_percent";
pub const DEFAULT_RATE_12M: &str = "default_rate_12m";
pub const DEFAULT_RATE_24M: &str = "default_rate_24m";
pub const DEFAULT_RATE_36M: &str = "default_rate_36m";

pub const MAX_PENALTY_PERCENT: f64 = 10.0;
pub const MAX_DEFAULT_RATE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct SystemConfigForm {
    pub interest_type: InterestType,
    pub penalty_percent: String,
    pub default_rate_12m: String,
    pub default_rate_24m: String,
    pub default_rate_36m: String,
    pub errors: FieldErrors,
}

impl Default for SystemConfigForm {
    fn default() -> Self {
        Self::from_config(&SystemConfig::default())
    }
}

impl SystemConfigForm {
    /// Pre-fill from the fetched configuration
    pub fn from_config(config: &SystemConfig) -> Self {
        Self {
            interest_type: config.interest_type,
            penalty_percent: config.penalty_percent.to_string(),
            default_rate_12m: config.default_rate_12m.to_string(),
            default_rate_24m: config.default_rate_24m.to_string(),
            default_rate_36m: config.default_rate_36m.to_string(),
            errors: FieldErrors::default(),
        }
    }
}

fn check_range(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    raw: &str,
    max: f64,
) -> Option<f64> {
    let value = parse_number(raw).filter(|v| (0.0..=max).contains(v));
    if value.is_none() {
        errors.insert(field, format!("{} must be between 0 and {}%", label, max));
    }
    value
}

impl Form for SystemConfigForm {
    type Output = SystemConfigUpdate;

    fn check(&self) -> Result<SystemConfigUpdate, FieldErrors> {
        let mut errors = FieldErrors::new();

        let penalty_percent = check_range(
            &mut errors,
            PENALTY_PERCENT,
            "Penalty",
            &self.penalty_percent,
            MAX_PENALTY_PERCENT,
        );
        let default_rate_12m = check_range(
            &mut errors,
            DEFAULT_RATE_12M,
            "12-month rate",
            &self.default_rate_12m,
            MAX_DEFAULT_RATE,
        );
        let default_rate_24m = check_range(
            &mut errors,
            DEFAULT_RATE_24M,
            "24-month rate",
            &self.default_rate_24m,
            MAX_DEFAULT_RATE,
        );
        let default_rate_36m = check_range(
            &mut errors,
            DEFAULT_RATE_36M,
            "36-month rate",
            &self.default_rate_36m,
            MAX_DEFAULT_RATE,
        );

        errors.into_result(|| SystemConfigUpdate {
            interest_type: Some(self.interest_type),
            penalty_percent,
            default_rate_12m,
            default_rate_24m,
            default_rate_36m,
        })
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut FieldErrors {
        &mut self.errors
    }

    fn assign(&mut self, field: &str, value: &str) {
        match field {
            INTEREST_TYPE => {
                if let Ok(interest_type) = value.parse() {
                    self.interest_type = interest_type;
                }
            }
            PENALTY_PERCENT => self.penalty_percent = value.to_string(),
            DEFAULT_RATE_12M => self.default_rate_12m = value.to_string(),
            DEFAULT_RATE_24M => self.default_rate_24m = value.to_string(),
            DEFAULT_RATE_36M => self.default_rate_36m = value.to_string(),
            _ => {}
        }
    }
}
