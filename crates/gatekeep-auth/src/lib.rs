//! # gatekeep-auth
//!
//! Authentication for Gatekeep: the login guard and everything it leans on.
//!
//! ## Modules
//!
//! - `ledger`: append-only login attempt history, storage backends, retention
//! - `guard`: lockout policy and the `authenticate` decision procedure
//! - `account`: account store abstraction over PostgreSQL or memory
//! - `password`: Argon2id hashing, credential comparison, password policy
//! - `jwt`: access token issuance and validation

pub mod account;
pub mod guard;
pub mod jwt;
pub mod ledger;
pub mod password;

pub use account::{AccountStore, MemoryAccountStore};
pub use guard::{AuthResult, DenyReason, LockoutPolicy, LockoutState, LoginGuard, SessionSubject};
pub use jwt::{AccessToken, Claims, JwtDecoder, JwtEncoder};
pub use ledger::{AccountLocks, AttemptLedger, AttemptStore, HistoryRetention, MemoryAttemptStore};
pub use password::{CredentialVerifier, PasswordHasher, PasswordValidator};
