//! Validates access tokens.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};

use gatekeep_core::config::AuthConfig;
use gatekeep_core::error::AppError;

use super::claims::Claims;

/// Message returned when a token's `exp` has passed.
pub const EXPIRED_MESSAGE: &str = "Token has expired, login again";

/// Message returned for any other token problem.
pub const UNAUTHENTICATED_MESSAGE: &str = "Please authenticate.";

/// Verifies signature and expiry of access tokens.
#[derive(Clone)]
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for JwtDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtDecoder")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtDecoder {
    /// Creates a decoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 5;

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Decodes and validates an access token.
    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::authentication(EXPIRED_MESSAGE)
                }
                _ => AppError::authentication(UNAUTHENTICATED_MESSAGE),
            })
    }
}
