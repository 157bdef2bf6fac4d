//! Authentication, lockout, and attempt-history configuration.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authentication and credential configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_access_ttl")]
    pub jwt_access_ttl_minutes: u64,
    /// Minimum password length for new passwords.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Reject new passwords that zxcvbn scores below "safely unguessable".
    #[serde(default)]
    pub require_strong_passwords: bool,
    /// Consecutive most-recent failures that trigger a lockout.
    #[serde(default = "default_lockout_threshold")]
    pub lockout_threshold: usize,
    /// Length of the lockout window in seconds, measured from the last failure.
    #[serde(default = "default_lockout_window")]
    pub lockout_window_seconds: u64,
    /// Serialize concurrent authentications for the same account.
    #[serde(default = "default_true")]
    pub serialize_per_account: bool,
    /// Attempt history older than this many days is pruned.
    #[serde(default = "default_retention_days")]
    pub history_retention_days: u32,
    /// Records per page on the login-history listing.
    #[serde(default = "default_history_page_size")]
    pub history_page_size: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_access_ttl_minutes: default_access_ttl(),
            password_min_length: default_password_min(),
            require_strong_passwords: false,
            lockout_threshold: default_lockout_threshold(),
            lockout_window_seconds: default_lockout_window(),
            serialize_per_account: true,
            history_retention_days: default_retention_days(),
            history_page_size: default_history_page_size(),
        }
    }
}

impl AuthConfig {
    /// Rejects settings under which the lockout rule is meaningless.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.lockout_threshold == 0 {
            return Err(AppError::configuration(
                "auth.lockout_threshold must be at least 1",
            ));
        }
        if self.lockout_window_seconds == 0 {
            return Err(AppError::configuration(
                "auth.lockout_window_seconds must be at least 1",
            ));
        }
        if self.jwt_secret.is_empty() {
            return Err(AppError::configuration("auth.jwt_secret must not be empty"));
        }
        Ok(())
    }

    /// The retention period as a chrono duration.
    pub fn history_retention(&self) -> Duration {
        Duration::days(i64::from(self.history_retention_days))
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_access_ttl() -> u64 {
    10
}

fn default_password_min() -> usize {
    8
}

fn default_lockout_threshold() -> usize {
    3
}

fn default_lockout_window() -> u64 {
    60
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> u32 {
    30
}

fn default_history_page_size() -> u64 {
    10
}
