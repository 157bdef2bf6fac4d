//! In-memory account store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_entity::account::{Account, AccountChanges, CreateAccount};

use super::store::AccountStore;

/// Account store backed by a `HashMap` behind a Tokio `RwLock`.
///
/// Uniqueness checks and inserts happen under one write lock, so two
/// concurrent creates for the same login cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts.
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.login == login)
            .cloned())
    }

    async fn exists_by_email_or_login(&self, email: &str, login: &str) -> AppResult<bool> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .any(|a| a.email == email || a.login == login))
    }

    async fn email_taken_by_other(&self, email: &str, except: AccountId) -> AppResult<bool> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .any(|a| a.id != except && a.email == email))
    }

    async fn create(&self, data: CreateAccount, now: DateTime<Utc>) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;

        if accounts
            .values()
            .any(|a| a.email == data.email || a.login == data.login)
        {
            return Err(AppError::conflict("Email or login already used"));
        }

        let account = Account {
            id: AccountId::new(),
            name: data.name,
            email: data.email,
            login: data.login,
            password_hash: data.password_hash,
            dob: data.dob,
            created_at: now,
            updated_at: now,
        };
        accounts.insert(account.id, account.clone());

        Ok(account)
    }

    async fn update(
        &self,
        id: AccountId,
        changes: AccountChanges,
        now: DateTime<Utc>,
    ) -> AppResult<Account> {
        let mut accounts = self.accounts.write().await;

        if let Some(email) = &changes.email {
            if accounts.values().any(|a| a.id != id && &a.email == email) {
                return Err(AppError::conflict("Email already used"));
            }
        }

        let account = accounts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))?;
        changes.apply_to(account, now);

        Ok(account.clone())
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        Ok(self.accounts.write().await.remove(&id).is_some())
    }
}
