//! Authentication outcomes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use gatekeep_core::types::AccountId;
use gatekeep_entity::account::Account;

/// The identity handed to session issuance after a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSubject {
    /// Authenticated account.
    pub account_id: AccountId,
    /// Login name.
    pub login: String,
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Date of birth.
    pub dob: NaiveDate,
}

impl From<&Account> for SessionSubject {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            login: account.login.clone(),
            name: account.name.clone(),
            email: account.email.clone(),
            dob: account.dob,
        }
    }
}

/// Why an authentication was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyReason {
    /// Wrong credential, or no such account.
    InvalidCredential,
    /// Too many recent failures.
    LockedOut {
        /// Whole seconds until the lockout lifts.
        remaining_seconds: u64,
    },
}

/// The guard's verdict on a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    /// Credential matched and the account is not locked.
    Allowed(SessionSubject),
    /// Authentication refused.
    Denied(DenyReason),
}

impl AuthResult {
    /// Whether the attempt was allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed(_))
    }

    /// Seconds remaining on a lockout, if this is one.
    pub fn lockout_remaining(&self) -> Option<u64> {
        match self {
            Self::Denied(DenyReason::LockedOut { remaining_seconds }) => Some(*remaining_seconds),
            _ => None,
        }
    }
}
