//! Login: run the guard, then issue an access token.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use gatekeep_auth::{AuthResult, DenyReason, JwtEncoder, LoginGuard};
use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;

/// Login input.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    /// Login name.
    #[validate(length(min = 1))]
    pub login: String,
    /// Plaintext password.
    #[validate(length(min = 1))]
    pub password: String,
}

/// What a successful login returns to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginGrant {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// Login name.
    pub login: String,
    /// Signed access token.
    pub access_token: String,
    /// When the access token expires.
    pub expires_at: DateTime<Utc>,
}

/// The result of a login attempt.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    /// Authenticated; a token was issued.
    Granted(LoginGrant),
    /// Refused by the guard.
    Denied(DenyReason),
}

/// Authenticates through the [`LoginGuard`] and issues tokens.
#[derive(Debug, Clone)]
pub struct LoginService {
    guard: Arc<LoginGuard>,
    encoder: Arc<JwtEncoder>,
}

impl LoginService {
    /// Creates a new login service.
    pub fn new(guard: Arc<LoginGuard>, encoder: Arc<JwtEncoder>) -> Self {
        Self { guard, encoder }
    }

    /// Attempts a login.
    pub async fn login(&self, req: LoginRequest) -> AppResult<LoginOutcome> {
        req.validate()
            .map_err(|_| AppError::validation("Please provide login and password"))?;

        match self.guard.authenticate(&req.login, &req.password).await? {
            AuthResult::Allowed(subject) => {
                let token = self.encoder.generate_access_token(&subject)?;
                Ok(LoginOutcome::Granted(LoginGrant {
                    name: subject.name,
                    email: subject.email,
                    dob: subject.dob,
                    login: subject.login,
                    access_token: token.token,
                    expires_at: token.expires_at,
                }))
            }
            AuthResult::Denied(reason) => Ok(LoginOutcome::Denied(reason)),
        }
    }
}
