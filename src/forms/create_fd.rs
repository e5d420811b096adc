//! Create-FD form

use chrono::NaiveDate;

use super::{check_length, parse_number, FieldErrors, Form};
use crate::models::{CreateFdRequest, IdType, SystemConfig, TenureUnit};

pub const CUSTOMER_NAME: &str = "customer_name";
pub const ID_TYPE: &str = "id_type";
pub const ID_NUMBER: &str = "id_number";
pub const DEPOSIT_AMOUNT: &str = "deposit_amount";
pub const INTEREST_RATE: &str = "interest_rate";
pub const TENURE_VALUE: &str = "tenure_value";
pub const TENURE_UNIT: &str = "tenure_unit";
pub const START_DATE: &str = "start_date";

/// Highest annual rate the backend accepts, in percent
pub const MAX_INTEREST_RATE: f64 = 20.0;

/// Raw state of the create-FD form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateFdForm {
    pub customer_name: String,
    pub id_type: IdType,
    pub id_number: String,
    pub deposit_amount: String,
    pub interest_rate: String,
    pub tenure_value: String,
    pub tenure_unit: TenureUnit,
    /// `YYYY-MM-DD`
    pub start_date: String,
    pub errors: FieldErrors,
}

impl CreateFdForm {
    /// Blank form starting today, with the 12-month default rate pre-filled
    /// once the system config is known
    pub fn new(today: NaiveDate, config: Option<&SystemConfig>) -> Self {
        Self {
            start_date: today.format("%Y-%m-%d").to_string(),
            interest_rate: config
                .map(|c| c.default_rate_12m.to_string())
                .unwrap_or_default(),
            ..Default::default()
        }
    }
}

impl Form for CreateFdForm {
    type Output = CreateFdRequest;

    fn check(&self) -> Result<CreateFdRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        check_length(&mut errors, CUSTOMER_NAME, "Customer name", &self.customer_name, 2, 200);
        check_length(&mut errors, ID_NUMBER, "ID number", &self.id_number, 4, 50);

        let deposit_amount = parse_number(&self.deposit_amount).filter(|v| *v > 0.0);
        if deposit_amount.is_none() {
            errors.insert(DEPOSIT_AMOUNT, "Deposit amount must be greater than 0");
        }

        let interest_rate =
            parse_number(&self.interest_rate).filter(|v| *v > 0.0 && *v <= MAX_INTEREST_RATE);
        if interest_rate.is_none() {
            errors.insert(INTEREST_RATE, "Interest rate must be between 0 and 20%");
        }

        // Compared as a float so values too large for u32 still hit the cap
        let max_tenure = self.tenure_unit.max_value();
        let tenure_value = match parse_number(&self.tenure_value) {
            Some(value) if value > f64::from(max_tenure) => {
                let message = match self.tenure_unit {
                    TenureUnit::Months => "Tenure in months cannot exceed 240 (20 years)",
                    TenureUnit::Years => "Tenure in years cannot exceed 20",
                };
                errors.insert(TENURE_VALUE, message);
                None
            }
            Some(value) if value > 0.0 => match self.tenure_value.trim().parse::<u32>() {
                Ok(whole) => Some(whole),
                Err(_) => {
                    errors.insert(TENURE_VALUE, "Tenure must be a whole number");
                    None
                }
            },
            _ => {
                errors.insert(TENURE_VALUE, "Tenure must be greater than 0");
                None
            }
        };

        let start_date = NaiveDate::parse_from_str(self.start_date.trim(), "%Y-%m-%d").ok();
        if start_date.is_none() {
            errors.insert(START_DATE, "Start date must be a valid date");
        }

        match (deposit_amount, interest_rate, tenure_value, start_date) {
            (Some(deposit_amount), Some(interest_rate), Some(tenure_value), Some(start_date))
                if errors.is_empty() =>
            {
                Ok(CreateFdRequest {
                    customer_name: self.customer_name.trim().to_string(),
                    id_type: self.id_type,
                    id_number: self.id_number.trim().to_string(),
                    deposit_amount,
                    interest_rate,
                    tenure_value,
                    tenure_unit: self.tenure_unit,
                    start_date,
                })
            }
            _ => Err(errors),
        }
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut FieldErrors {
        &mut self.errors
    }

    fn assign(&mut self, field: &str, value: &str) {
        match field {
            CUSTOMER_NAME => self.customer_name = value.to_string(),
            ID_TYPE => {
                if let Ok(id_type) = value.parse() {
                    self.id_type = id_type;
                }
            }
            ID_NUMBER => self.id_number = value.to_string(),
            DEPOSIT_AMOUNT => self.deposit_amount = value.to_string(),
            INTEREST_RATE => self.interest_rate = value.to_string(),
            TENURE_VALUE => self.tenure_value = value.to_string(),
            TENURE_UNIT => {
                if let Ok(unit) = value.parse() {
                    self.tenure_unit = unit;
                }
            }
            START_DATE => self.start_date = value.to_string(),
            _ => {}
        }
    }
}
