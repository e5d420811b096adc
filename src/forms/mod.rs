//! Form State and Validation
//!
//! Every form keeps the raw text the user typed plus a per-field error map.
//! [`Form::validate`] either coerces the raw values into the typed request
//! the gateway sends, or records why it cannot; submission is blocked while
//! any field has an error. Editing a field clears that field's error.
//!
//! The rules mirror the backend's request validation so most mistakes are
//! caught before a round-trip; the server remains authoritative.

pub mod create_fd;
pub mod login;
pub mod system_config;
pub mod user;

pub use create_fd::CreateFdForm;
pub use login::LoginForm;
pub use system_config::SystemConfigForm;
pub use user::CreateUserForm;

use std::collections::BTreeMap;
use std::fmt;

/// Validation messages keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn clear(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(value)` when no field failed
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Raw form state with synchronous validation
pub trait Form {
    /// Typed value produced by a successful validation
    type Output;

    /// Run the validators without touching stored state
    fn check(&self) -> Result<Self::Output, FieldErrors>;

    fn errors(&self) -> &FieldErrors;

    fn errors_mut(&mut self) -> &mut FieldErrors;

    /// Assign a raw value by field name. Unknown fields are ignored.
    fn assign(&mut self, field: &str, value: &str);

    /// Edit a field and clear its error
    fn set_field(&mut self, field: &str, value: &str) {
        self.assign(field, value);
        self.errors_mut().clear(field);
    }

    /// Validate and remember the outcome for rendering
    fn validate(&mut self) -> Result<Self::Output, FieldErrors> {
        let result = self.check();
        *self.errors_mut() = match &result {
            Ok(_) => FieldErrors::default(),
            Err(errors) => errors.clone(),
        };
        result
    }

    fn error(&self, field: &str) -> Option<&str> {
        self.errors().get(field)
    }
}

/// Character count of the trimmed value, checked against inclusive bounds
pub(crate) fn check_length(
    errors: &mut FieldErrors,
    field: &'static str,
    label: &str,
    value: &str,
    min: usize,
    max: usize,
) {
    let len = value.trim().chars().count();
    if len == 0 {
        errors.insert(field, format!("{} is required", label));
    } else if len < min {
        errors.insert(field, format!("{} must be at least {} characters", label, min));
    } else if len > max {
        errors.insert(field, format!("{} must be at most {} characters", label, max));
    }
}

/// Parse a number, accepting surrounding whitespace
pub(crate) fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_display() {
        let mut errors = FieldErrors::new();
        errors.insert("username", "Username is required");
        errors.insert("password", "Password is required");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "password: Password is required; username: Username is required"
        );

        errors.clear("password");
        assert_eq!(errors.get("password"), None);
        assert_eq!(errors.get("username"), Some("Username is required"));
    }

    #[test]
    fn test_check_length() {
        let mut errors = FieldErrors::new();
        check_length(&mut errors, "name", "Name", "  ", 2, 5);
        assert_eq!(errors.get("name"), Some("Name is required"));

        let mut errors = FieldErrors::new();
        check_length(&mut errors, "name", "Name", "a", 2, 5);
        assert_eq!(errors.get("name"), Some("Name must be at least 2 characters"));

        let mut errors = FieldErrors::new();
        check_length(&mut errors, "name", "Name", "abcdef", 2, 5);
        assert_eq!(errors.get("name"), Some("Name must be at most 5 characters"));

        let mut errors = FieldErrors::new();
        check_length(&mut errors, "name", "Name", " ab ", 2, 5);
        assert!(errors.is_empty());
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(" 7.5 "), Some(7.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number(""), None);
    }
}
