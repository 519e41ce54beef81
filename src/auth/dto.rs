use serde::{Deserialize, Serialize};

use crate::auth::repo_types::PublicUser;
use crate::error::FieldError;
use crate::validation::{is_valid_email, Checks, Validate};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::default()
            .non_blank(&self.name, "name", "Name is required")
            .require(is_valid_email(self.email.trim()), "email", "Invalid email")
            .require(
                self.password.chars().count() >= MIN_PASSWORD_LEN,
                "password",
                &format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            )
            .finish()
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), Vec<FieldError>> {
        Checks::default()
            .require(is_valid_email(self.email.trim()), "email", "Invalid email")
            .require(!self.password.is_empty(), "password", "Password is required")
            .finish()
    }
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}
