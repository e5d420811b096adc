//! Create-user form (supervisor only)

use super::{FieldErrors, Form};
use crate::models::{CreateUserRequest, Role};

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const ROLE: &str = "role";

pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateUserForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub errors: FieldErrors,
}

impl Form for CreateUserForm {
    type Output = CreateUserRequest;

    fn check(&self) -> Result<CreateUserRequest, FieldErrors> {
        let mut errors = FieldErrors::new();

        super::check_length(
            &mut errors,
            USERNAME,
            "Username",
            &self.username,
            USERNAME_MIN,
            USERNAME_MAX,
        );

        // Passwords are sent as typed; whitespace counts
        let password_len = self.password.chars().count();
        if password_len == 0 {
            errors.insert(PASSWORD, "Password is required");
        } else if password_len < PASSWORD_MIN {
            errors.insert(
                PASSWORD,
                format!("Password must be at least {} characters", PASSWORD_MIN),
            );
        }

        errors.into_result(|| CreateUserRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
            role: self.role,
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
            USERNAME => self.username = value.to_string(),
            PASSWORD => self.password = value.to_string(),
            ROLE => {
                if let Ok(role) = value.parse() {
                    self.role = role;
                }
            }
            _ => {}
        }
    }
}
