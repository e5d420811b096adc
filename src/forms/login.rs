//! Login form

use super::{FieldErrors, Form};

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";

/// Credentials as typed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub errors: FieldErrors,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            errors: FieldErrors::default(),
        }
    }
}

impl Form for LoginForm {
    /// `(username, password)`
    type Output = (String, String);

    fn check(&self) -> Result<(String, String), FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.username.trim().is_empty() {
            errors.insert(USERNAME, "Username is required");
        }
        if self.password.is_empty() {
            errors.insert(PASSWORD, "Password is required");
        }
        errors.into_result(|| (self.username.trim().to_string(), self.password.clone()))
    }

    fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut FieldErrors {
        &mut self.errors
    }

    fn assign(&mut self, field: &str, value: &str) {
        match field {
            USERNAME => self.username = value.to_string(),
            PASSWORD => self.password = value.to_string(),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_both_fields() {
        let mut form = LoginForm::default();
        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get(USERNAME), Some("Username is required"));
        assert_eq!(errors.get(PASSWORD), Some("Password is required"));

        form.set_field(USERNAME, "admin");
        assert_eq!(form.error(USERNAME), None);
        assert!(form.error(PASSWORD).is_some());
    }

    #[test]
    fn test_trims_username_only() {
        let mut form = LoginForm::new(" admin ", " admin123");
        assert_eq!(
            form.validate().unwrap(),
            ("admin".to_string(), " admin123".to_string())
        );
    }
}
