//! Maturity Preview
//!
//! Estimate of an FD's maturity shown while the create form is filled in.
//! The server recomputes the authoritative figures on create.
//!
//! The amount uses fractional years (`months / 12`) while the maturity date
//! advances the calendar by the literal tenure, so for month tenures the two
//! can describe slightly different periods. The server does the same.

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::forms::CreateFdForm;
use crate::models::{InterestType, SystemConfig, Tenure};

/// Inputs to the preview; any missing or invalid field suppresses it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PreviewInputs {
    pub principal: Option<f64>,
    /// Annual rate in percent
    pub rate: Option<f64>,
    pub tenure: Option<Tenure>,
    pub start_date: Option<NaiveDate>,
}

impl PreviewInputs {
    /// Parse the raw create-form fields, dropping whatever does not parse
    pub fn from_form(form: &CreateFdForm) -> Self {
        let tenure = form
            .tenure_value
            .trim()
            .parse::<u32>()
            .ok()
            .map(|value| Tenure::new(value, form.tenure_unit));

        Self {
            principal: form.deposit_amount.trim().parse().ok(),
            rate: form.interest_rate.trim().parse().ok(),
            tenure,
            start_date: NaiveDate::parse_from_str(form.start_date.trim(), "%Y-%m-%d").ok(),
        }
    }
}

/// Estimated maturity figures
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview {
    /// Rounded to cents
    pub maturity_amount: f64,
    pub maturity_date: NaiveDate,
    /// Rounded to cents
    pub interest_earned: f64,
    pub interest_type: InterestType,
}

/// Compute the preview, or `None` until every input is present and valid
pub fn compute_preview(inputs: &PreviewInputs, config: &SystemConfig) -> Option<Preview> {
    let principal = inputs.principal.filter(|p| p.is_finite() && *p > 0.0)?;
    let rate = inputs.rate.filter(|r| r.is_finite() && *r > 0.0)?;
    let tenure = inputs.tenure.filter(|t| t.value > 0)?;
    let start = inputs.start_date?;

    let amount = maturity_amount(principal, rate, tenure.as_years(), config.interest_type);
    let maturity_date = maturity_date(start, tenure)?;

    Some(Preview {
        maturity_amount: round_cents(amount),
        maturity_date,
        interest_earned: round_cents(amount - principal),
        interest_type: config.interest_type,
    })
}

/// Maturity value of `principal` at `rate` percent per year over `years`
///
/// - simple: `P × (1 + r × y)`
/// - compound (annual): `P × (1 + r)^y`
pub fn maturity_amount(principal: f64, rate: f64, years: f64, interest_type: InterestType) -> f64 {
    let r = rate / 100.0;
    match interest_type {
        InterestType::Simple => principal * (1.0 + r * years),
        InterestType::Compound => principal * (1.0 + r).powf(years),
    }
}

/// Start date advanced by the tenure in calendar months.
///
/// Days past the end of the target month clamp to its last day
/// (31 Jan + 1 month = 28 or 29 Feb).
pub fn maturity_date(start: NaiveDate, tenure: Tenure) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(tenure.as_months()))
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
