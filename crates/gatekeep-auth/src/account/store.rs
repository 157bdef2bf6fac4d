//! Account store trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_entity::account::{Account, AccountChanges, CreateAccount};

/// Lookup and persistence of accounts.
///
/// `login` and `email` are unique. Creating or updating into a taken value
/// fails with a conflict error.
#[async_trait]
pub trait AccountStore: Send + Sync + std::fmt::Debug {
    /// Finds an account by ID.
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>>;

    /// Finds an account by exact login.
    async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>>;

    /// Whether any account already uses `email` or `login`.
    async fn exists_by_email_or_login(&self, email: &str, login: &str) -> AppResult<bool>;

    /// Whether an account other than `except` uses `email`.
    async fn email_taken_by_other(&self, email: &str, except: AccountId) -> AppResult<bool>;

    /// Inserts a new account.
    async fn create(&self, data: CreateAccount, now: DateTime<Utc>) -> AppResult<Account>;

    /// Applies a partial update and returns the result.
    async fn update(
        &self,
        id: AccountId,
        changes: AccountChanges,
        now: DateTime<Utc>,
    ) -> AppResult<Account>;

    /// Deletes an account. Returns whether it existed.
    async fn delete(&self, id: AccountId) -> AppResult<bool>;
}
