//! Signs access tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatekeep_core::config::AuthConfig;
use gatekeep_core::error::AppError;

use crate::guard::SessionSubject;

use super::claims::Claims;

/// Creates HS256-signed access tokens for authenticated accounts.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    access_ttl: Duration,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("access_ttl", &self.access_ttl)
            .finish()
    }
}

/// A signed access token and its expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    /// The encoded JWT.
    pub token: String,
    /// When the token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl JwtEncoder {
    /// Creates an encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_ttl: Duration::minutes(config.jwt_access_ttl_minutes as i64),
        }
    }

    /// Issues an access token for `subject`.
    pub fn generate_access_token(&self, subject: &SessionSubject) -> Result<AccessToken, AppError> {
        let now = Utc::now();
        let expires_at = now + self.access_ttl;

        let claims = Claims {
            sub: subject.account_id,
            login: subject.login.clone(),
            name: subject.name.clone(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;

        Ok(AccessToken { token, expires_at })
    }
}
