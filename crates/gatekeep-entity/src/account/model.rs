//! Account entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatekeep_core::types::AccountId;

/// A registered account.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    /// Unique account identifier.
    pub id: AccountId,
    /// Full name.
    pub name: String,
    /// Email address (unique).
    pub email: String,
    /// Login name (unique).
    pub login: String,
    /// Argon2 password hash. Opaque to everything but the hasher.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Date of birth.
    pub dob: NaiveDate,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// The fields an account owner may see after an update.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            name: self.name.clone(),
            email: self.email.clone(),
            dob: self.dob,
        }
    }
}

/// Data required to create a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccount {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Login name.
    pub login: String,
    /// Pre-hashed password.
    pub password_hash: String,
    /// Date of birth.
    pub dob: NaiveDate,
}

/// A partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountChanges {
    /// New full name.
    pub name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New pre-hashed password.
    pub password_hash: Option<String>,
    /// New date of birth.
    pub dob: Option<NaiveDate>,
}

impl AccountChanges {
    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
            && self.dob.is_none()
    }

    /// Apply the changes to an in-memory account.
    pub fn apply_to(&self, account: &mut Account, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            account.name = name.clone();
        }
        if let Some(email) = &self.email {
            account.email = email.clone();
        }
        if let Some(hash) = &self.password_hash {
            account.password_hash = hash.clone();
        }
        if let Some(dob) = self.dob {
            account.dob = dob;
        }
        account.updated_at = now;
    }
}

/// Public profile fields returned after an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountProfile {
    /// Full name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Date of birth.
    pub dob: NaiveDate,
}
