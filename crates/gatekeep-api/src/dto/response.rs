//! Response DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A bare confirmation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Wraps a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful login body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Login name.
    pub login: String,
    /// Bearer token for the other account endpoints.
    pub access_token: String,
}

/// Body returned while an account is locked out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedResponse {
    /// Human-readable message.
    pub message: String,
    /// Always `true`.
    pub blocked: bool,
    /// Seconds until another attempt is evaluated.
    pub time: u64,
}

/// Health probe body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Which storage backend is active and whether it answered.
    pub storage: String,
}
