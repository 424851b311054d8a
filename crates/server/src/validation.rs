//! Request-shape validation for the auth routes.
//!
//! Runs before the service is called, so malformed payloads never reach hashing
//! or the datastore.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use service::auth::domain::{LoginInput, RegisterInput};

pub const MIN_PASSWORD_LEN: usize = 8;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Basic email format check; the address is not normalized.
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// One rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }
}

/// Body of `POST /auth/users`. Missing fields deserialize empty and are reported by [`RegisterRequest::validate`].
#[derive(Deserialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    #[serde(default)]
    pub fullname: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Body of `POST /auth/tokens`.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<RegisterInput, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.fullname.trim().is_empty() {
            errors.push(FieldError::new("fullname", "fullname is required"));
        }
        if self.email.is_empty() {
            errors.push(FieldError::new("email", "email is required"));
        } else if !valid_email(&self.email) {
            errors.push(FieldError::new("email", "email must be a valid email address"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FieldError::new(
                "password",
                format!("password must be at least {MIN_PASSWORD_LEN} characters"),
            ));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(RegisterInput { email: self.email, fullname: self.fullname, password: self.password })
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<LoginInput, Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.email.is_empty() {
            errors.push(FieldError::new("email", "email is required"));
        }
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "password is required"));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(LoginInput { email: self.email, password: self.password })
    }
}
