//! Fixed Deposit types
//!
//! Accounts as returned by the register and detail endpoints, the create
//! request/response pair, and the premature-closure simulation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of an FD account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FdStatus {
    /// Running, accrues interest until maturity
    Active,
    /// Matured and paid out
    Closed,
    /// Closed before maturity with a penalty
    PrematurelyClosed,
}

impl FdStatus {
    pub fn all() -> &'static [FdStatus] {
        &[FdStatus::Active, FdStatus::Closed, FdStatus::PrematurelyClosed]
    }

    /// Wire value, also used as the filter query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            FdStatus::Active => "Active",
            FdStatus::Closed => "Closed",
            FdStatus::PrematurelyClosed => "PrematurelyClosed",
        }
    }

    /// Human readable label
    pub fn label(&self) -> &'static str {
        match self {
            FdStatus::Active => "Active",
            FdStatus::Closed => "Closed",
            FdStatus::PrematurelyClosed => "Prematurely Closed",
        }
    }

    /// Once closed an account never changes again
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FdStatus::Active)
    }
}

impl fmt::Display for FdStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FdStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "active" => Ok(FdStatus::Active),
            "closed" => Ok(FdStatus::Closed),
            "prematurelyclosed" => Ok(FdStatus::PrematurelyClosed),
            _ => Err(format!(
                "Unknown status: {}. Use: Active, Closed, PrematurelyClosed",
                s
            )),
        }
    }
}

/// Unit of an FD tenure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TenureUnit {
    #[default]
    Months,
    Years,
}

impl TenureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TenureUnit::Months => "months",
            TenureUnit::Years => "years",
        }
    }

    /// Largest tenure the backend accepts in this unit (20 years)
    pub fn max_value(&self) -> u32 {
        match self {
            TenureUnit::Months => 240,
            TenureUnit::Years => 20,
        }
    }
}

impl fmt::Display for TenureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenureUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "months" | "month" | "m" => Ok(TenureUnit::Months),
            "years" | "year" | "y" => Ok(TenureUnit::Years),
            _ => Err(format!("Unknown tenure unit: {}. Use: months, years", s)),
        }
    }
}

/// A deposit duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tenure {
    pub value: u32,
    pub unit: TenureUnit,
}

impl Tenure {
    pub fn new(value: u32, unit: TenureUnit) -> Self {
        Self { value, unit }
    }

    pub fn months(value: u32) -> Self {
        Self::new(value, TenureUnit::Months)
    }

    pub fn years(value: u32) -> Self {
        Self::new(value, TenureUnit::Years)
    }

    /// Tenure as fractional years, the unit the interest formulas use
    pub fn as_years(&self) -> f64 {
        match self.unit {
            TenureUnit::Months => self.value as f64 / 12.0,
            TenureUnit::Years => self.value as f64,
        }
    }

    /// Tenure in whole months
    pub fn as_months(&self) -> u32 {
        match self.unit {
            TenureUnit::Months => self.value,
            TenureUnit::Years => self.value.saturating_mul(12),
        }
    }
}

impl fmt::Display for Tenure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

impl FromStr for Tenure {
    type Err = String;

    /// Parses the register's preformatted `"12 months"` form
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let value = parts
            .next()
            .ok_or_else(|| "Empty tenure".to_string())?
            .parse::<u32>()
            .map_err(|e| format!("Invalid tenure value in {:?}: {}", s, e))?;
        let unit = parts
            .next()
            .ok_or_else(|| format!("Missing tenure unit in {:?}", s))?
            .parse::<TenureUnit>()?;
        Ok(Tenure { value, unit })
    }
}

/// Interest calculation method configured globally
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Simple,
    /// Annual compounding
    #[default]
    Compound,
}

impl InterestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestType::Simple => "simple",
            InterestType::Compound => "compound",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InterestType::Simple => "Simple Interest",
            InterestType::Compound => "Compound Interest (Annual)",
        }
    }

    /// Formula hint shown next to the config selector
    pub fn formula(&self) -> &'static str {
        match self {
            InterestType::Simple => "Formula: Principal × (1 + Rate × Years)",
            InterestType::Compound => "Formula: Principal × (1 + Rate)^Years",
        }
    }
}

impl fmt::Display for InterestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InterestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(InterestType::Simple),
            "compound" => Ok(InterestType::Compound),
            _ => Err(format!("Unknown interest type: {}. Use: simple, compound", s)),
        }
    }
}

/// Customer identity document accepted for KYC
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum IdType {
    #[default]
    Aadhaar,
    #[serde(rename = "PAN")]
    Pan,
    Passport,
    #[serde(rename = "Voter ID")]
    VoterId,
    #[serde(rename = "Driving License")]
    DrivingLicense,
}

impl IdType {
    pub fn all() -> &'static [IdType] {
        &[
            IdType::Aadhaar,
            IdType::Pan,
            IdType::Passport,
            IdType::VoterId,
            IdType::DrivingLicense,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdType::Aadhaar => "Aadhaar",
            IdType::Pan => "PAN",
            IdType::Passport => "Passport",
            IdType::VoterId => "Voter ID",
            IdType::DrivingLicense => "Driving License",
        }
    }
}

impl fmt::Display for IdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace(['-', '_'], " ");
        IdType::all()
            .iter()
            .copied()
            .find(|t| t.as_str().to_lowercase() == wanted)
            .ok_or_else(|| {
                format!(
                    "Unknown ID type: {}. Use one of: {}",
                    s,
                    IdType::all()
                        .iter()
                        .map(|t| t.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            })
    }
}

/// An FD account as returned by `GET /fd` and `GET /fd/{fdNo}`
///
/// The register endpoint sends a preformatted `tenure` string while the
/// detail endpoint sends `tenure_value` and `tenure_unit`; both shapes are
/// accepted and [`FdAccount::tenure`] reconciles them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FdAccount {
    pub fd_no: String,
    pub customer_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub deposit_amount: f64,
    pub interest_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_value: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_unit: Option<TenureUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure: Option<String>,
    pub start_date: NaiveDate,
    pub maturity_date: NaiveDate,
    pub maturity_amount: f64,
    #[serde(default, alias = "interest_type_used")]
    pub interest_type: Option<InterestType>,
    pub status: FdStatus,
    #[serde(default)]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
}

impl FdAccount {
    pub fn tenure(&self) -> Option<Tenure> {
        match (self.tenure_value, self.tenure_unit) {
            (Some(value), Some(unit)) => Some(Tenure::new(value, unit)),
            _ => self.tenure.as_deref().and_then(|t| t.parse().ok()),
        }
    }

    /// Display form of the tenure, falling back to whatever the server sent
    pub fn tenure_label(&self) -> String {
        self.tenure()
            .map(|t| t.to_string())
            .or_else(|| self.tenure.clone())
            .unwrap_or_else(|| "-".to_string())
    }

    /// Premature closure can only be simulated on a running account
    pub fn can_simulate(&self) -> bool {
        self.status == FdStatus::Active
    }

    /// The mature action is offered once the maturity date has been reached
    pub fn can_mature(&self, today: NaiveDate) -> bool {
        self.status == FdStatus::Active && self.maturity_date <= today
    }

    pub fn receipt_file_name(&self) -> String {
        receipt_file_name(&self.fd_no)
    }
}

/// File name used when saving a downloaded receipt
pub fn receipt_file_name(fd_no: &str) -> String {
    format!("FD_Receipt_{}.pdf", fd_no)
}

/// Body of `GET /fd`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FdList {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub fd_accounts: Vec<FdAccount>,
}

/// Body of `POST /fd`, already coerced to typed values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateFdRequest {
    pub customer_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub deposit_amount: f64,
    pub interest_rate: f64,
    pub tenure_value: u32,
    pub tenure_unit: TenureUnit,
    pub start_date: NaiveDate,
}

impl CreateFdRequest {
    pub fn tenure(&self) -> Tenure {
        Tenure::new(self.tenure_value, self.tenure_unit)
    }
}

/// Server acknowledgement of a created FD
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFdResponse {
    #[serde(default)]
    pub message: String,
    pub fd_no: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub deposit_amount: f64,
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default)]
    pub tenure: String,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub maturity_amount: f64,
    #[serde(default)]
    pub interest_type: Option<InterestType>,
}

/// Server-computed premature closure breakdown
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosureSimulation {
    #[serde(default)]
    pub fd_no: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub principal: f64,
    #[serde(default)]
    pub original_maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub simulated_closure_date: Option<NaiveDate>,
    pub days_held: i64,
    #[serde(default)]
    pub years_held: f64,
    pub accrued_interest: f64,
    #[serde(deserialize_with = "super::de::f64_lenient")]
    pub penalty_percent: f64,
    pub penalty_amount: f64,
    pub net_interest: f64,
    pub net_payout: f64,
    #[serde(default)]
    pub interest_type: Option<InterestType>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Generic `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ActionMessage {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_register_row_deserializes() {
        let json = r#"{
            "fd_no": "FD20250101120000AB12",
            "customer_name": "Ramesh Kumar",
            "id_type": "Aadhaar",
            "id_number": "1234-5678-9012",
            "deposit_amount": 100000.0,
            "interest_rate": 7.5,
            "tenure": "12 months",
            "start_date": "2025-01-01",
            "maturity_date": "2026-01-01",
            "maturity_amount": 107500.0,
            "interest_type": "compound",
            "status": "Active",
            "created_by": "officer1",
            "created_at": "2025-01-01 12:00:00"
        }"#;

        let fd: FdAccount = serde_json::from_str(json).unwrap();
        assert_eq!(fd.status, FdStatus::Active);
        assert_eq!(fd.tenure(), Some(Tenure::months(12)));
        assert_eq!(fd.interest_type, Some(InterestType::Compound));
        assert_eq!(fd.start_date, date(2025, 1, 1));
    }

    #[test]
    fn test_detail_row_deserializes() {
        let json = r#"{
            "id": 3,
            "fd_no": "FD1",
            "customer_name": "Asha",
            "id_type": "Voter ID",
            "id_number": "VOTE1234",
            "deposit_amount": 5000,
            "interest_rate": 6,
            "tenure_value": 2,
            "tenure_unit": "years",
            "start_date": "2024-03-01",
            "maturity_date": "2026-03-01",
            "maturity_amount": 5618.0,
            "interest_type_used": "simple",
            "status": "PrematurelyClosed",
            "closed_at": "2025-01-10",
            "created_by": "admin",
            "created_at": "2024-03-01 09:00:00"
        }"#;

        let fd: FdAccount = serde_json::from_str(json).unwrap();
        assert_eq!(fd.id_type, IdType::VoterId);
        assert_eq!(fd.tenure(), Some(Tenure::years(2)));
        assert_eq!(fd.tenure_label(), "2 years");
        assert_eq!(fd.interest_type, Some(InterestType::Simple));
        assert!(fd.status.is_terminal());
        assert!(!fd.can_simulate());
    }

    #[test]
    fn test_can_mature_only_when_due_and_active() {
        let json = r#"{
            "fd_no": "FD2", "customer_name": "B", "id_type": "PAN", "id_number": "ABCDE1234F",
            "deposit_amount": 1000, "interest_rate": 5, "tenure": "6 months",
            "start_date": "2025-01-01", "maturity_date": "2025-07-01",
            "maturity_amount": 1024.7, "status": "Active"
        }"#;
        let fd: FdAccount = serde_json::from_str(json).unwrap();

        assert!(!fd.can_mature(date(2025, 6, 30)));
        assert!(fd.can_mature(date(2025, 7, 1)));
        assert!(fd.can_simulate());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("active".parse::<FdStatus>().unwrap(), FdStatus::Active);
        assert_eq!(
            "Prematurely Closed".parse::<FdStatus>().unwrap(),
            FdStatus::PrematurelyClosed
        );
        assert_eq!(
            "prematurely-closed".parse::<FdStatus>().unwrap(),
            FdStatus::PrematurelyClosed
        );
        assert!("open".parse::<FdStatus>().is_err());
    }

    #[test]
    fn test_id_type_wire_names() {
        assert_eq!(serde_json::to_string(&IdType::VoterId).unwrap(), r#""Voter ID""#);
        assert_eq!(serde_json::to_string(&IdType::Pan).unwrap(), r#""PAN""#);
        assert_eq!("driving-license".parse::<IdType>().unwrap(), IdType::DrivingLicense);
        assert_eq!("pan".parse::<IdType>().unwrap(), IdType::Pan);
    }

    #[test]
    fn test_tenure_years() {
        assert_eq!(Tenure::months(18).as_years(), 1.5);
        assert_eq!(Tenure::years(3).as_years(), 3.0);
        assert_eq!(Tenure::years(3).as_months(), 36);
        assert!("twelve months".parse::<Tenure>().is_err());
    }

    #[test]
    fn test_create_request_serializes_typed_values() {
        let req = CreateFdRequest {
            customer_name: "Ramesh Kumar".to_string(),
            id_type: IdType::Aadhaar,
            id_number: "1234-5678-9012".to_string(),
            deposit_amount: 100000.0,
            interest_rate: 7.5,
            tenure_value: 12,
            tenure_unit: TenureUnit::Months,
            start_date: date(2025, 1, 1),
        };

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["tenure_value"], 12);
        assert_eq!(value["tenure_unit"], "months");
        assert_eq!(value["start_date"], "2025-01-01");
        assert_eq!(value["deposit_amount"], 100000.0);
    }

    #[test]
    fn test_closure_simulation_accepts_text_penalty() {
        let json = r#"{
            "days_held": 181, "accrued_interest": 3612.5, "penalty_percent": "1.0",
            "penalty_amount": 36.13, "net_interest": 3576.37, "net_payout": 103576.37
        }"#;
        let sim: ClosureSimulation = serde_json::from_str(json).unwrap();
        assert_eq!(sim.penalty_percent, 1.0);
        assert_eq!(sim.days_held, 181);
    }

    #[test]
    fn test_receipt_file_name() {
        assert_eq!(receipt_file_name("FD123"), "FD_Receipt_FD123.pdf");
    }
}
