//! Request shapes and field parsing for account operations.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use gatekeep_core::error::AppError;

/// Message for a registration with a missing field.
pub const MISSING_FIELDS: &str = "Please provide name, email, login, dob password";

/// Message for a malformed email address.
pub const INVALID_EMAIL: &str = "Invalid Email";

/// Registration input. Absent fields deserialize as empty strings and are
/// rejected by validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CreateAccountRequest {
    /// Full name.
    #[validate(length(min = 1, code = "required"))]
    pub name: String,
    /// Email address.
    #[validate(length(min = 1, code = "required"), email(code = "email"))]
    pub email: String,
    /// Plaintext password.
    #[validate(length(min = 1, code = "required"))]
    pub password: String,
    /// Login name.
    #[validate(length(min = 1, code = "required"))]
    pub login: String,
    /// Date of birth, `YYYY-MM-DD` or RFC 3339.
    #[validate(length(min = 1, code = "required"))]
    pub dob: String,
}

impl CreateAccountRequest {
    /// Runs field validation and maps failures to user-facing messages.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map_err(|errors| describe(&errors))
    }
}

/// A missing field outranks a malformed email.
fn describe(errors: &ValidationErrors) -> AppError {
    let codes: Vec<&str> = errors
        .field_errors()
        .values()
        .flat_map(|errs| errs.iter().map(|e| e.code.as_ref()))
        .collect();

    if codes.contains(&"required") {
        AppError::validation(MISSING_FIELDS)
    } else if codes.contains(&"email") {
        AppError::validation(INVALID_EMAIL)
    } else {
        AppError::validation(errors.to_string())
    }
}

/// Parses a date of birth given as a calendar date or a full timestamp.
pub fn parse_dob(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| AppError::validation("Invalid date of birth"))
}
