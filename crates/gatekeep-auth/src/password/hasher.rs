//! Argon2id password hashing and verification.

use std::sync::{Arc, OnceLock};

use argon2::{
    Argon2, Params,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;

use super::CredentialVerifier;

/// Hashes and verifies passwords using Argon2id.
///
/// Cost parameters only affect new hashes; verification reads them from
/// the stored PHC string.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    decoy: Arc<OnceLock<Option<String>>>,
}

/// Plaintext behind the decoy hash. Never assigned to an account.
const DECOY_SECRET: &str = "gatekeep-decoy-credential";

impl PasswordHasher {
    /// Creates a hasher with the Argon2 default cost parameters.
    pub fn new() -> Self {
        Self::with_params(Params::default())
    }

    /// Creates a hasher with explicit cost parameters.
    pub fn with_params(params: Params) -> Self {
        Self {
            params,
            decoy: Arc::new(OnceLock::new()),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(
            argon2::Algorithm::Argon2id,
            argon2::Version::V0x13,
            self.params.clone(),
        )
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored hash.
    ///
    /// Returns `Ok(false)` on mismatch; malformed hashes are errors.
    pub fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialVerifier for PasswordHasher {
    fn matches(&self, supplied: &str, stored_hash: &str) -> AppResult<bool> {
        self.verify_password(supplied, stored_hash)
    }

    fn match_decoy(&self, supplied: &str) {
        // Hashed on first use with this hasher's cost parameters.
        let decoy = self
            .decoy
            .get_or_init(|| self.hash_password(DECOY_SECRET).ok());
        if let Some(hash) = decoy {
            let _ = self.verify_password(supplied, hash);
        }
    }
}
