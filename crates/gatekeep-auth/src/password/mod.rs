//! Password hashing, credential comparison, and policy enforcement.

pub mod hasher;
pub mod validator;

pub use hasher::PasswordHasher;
pub use validator::PasswordValidator;

use gatekeep_core::result::AppResult;

/// Opaque one-way-hash comparison used by the login guard.
///
/// The guard never inspects a stored hash; it only asks whether a
/// supplied secret matches it.
pub trait CredentialVerifier: Send + Sync + std::fmt::Debug {
    /// Returns `Ok(true)` when `supplied` hashes to `stored_hash`.
    fn matches(&self, supplied: &str, stored_hash: &str) -> AppResult<bool>;

    /// Spends the same work as [`matches`](Self::matches) against a hash no
    /// account owns, so an unknown login costs as much as a known one.
    fn match_decoy(&self, supplied: &str) {
        let _ = supplied;
    }
}
