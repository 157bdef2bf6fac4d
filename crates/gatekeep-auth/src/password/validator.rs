//! Password policy enforcement for new passwords.

use gatekeep_core::config::AuthConfig;
use gatekeep_core::error::AppError;

/// Validates new passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
    require_strong: bool,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            require_strong: config.require_strong_passwords,
        }
    }

    /// Returns the first policy violation, if any.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if self.require_strong {
            let estimate = zxcvbn::zxcvbn(password, &[]);
            if estimate.score() < zxcvbn::Score::Three {
                return Err(AppError::validation(
                    "Password is too weak. Please use a stronger password with more entropy.",
                ));
            }
        }

        Ok(())
    }
}
