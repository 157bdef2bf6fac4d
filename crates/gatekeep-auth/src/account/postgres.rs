//! PostgreSQL-backed account store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_database::repositories::AccountRepository;
use gatekeep_entity::account::{Account, AccountChanges, CreateAccount};

use super::store::AccountStore;

#[async_trait]
impl AccountStore for AccountRepository {
    async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        AccountRepository::find_by_id(self, id).await
    }

    async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>> {
        AccountRepository::find_by_login(self, login).await
    }

    async fn exists_by_email_or_login(&self, email: &str, login: &str) -> AppResult<bool> {
        AccountRepository::exists_by_email_or_login(self, email, login).await
    }

    async fn email_taken_by_other(&self, email: &str, except: AccountId) -> AppResult<bool> {
        AccountRepository::email_taken_by_other(self, email, except).await
    }

    async fn create(&self, data: CreateAccount, now: DateTime<Utc>) -> AppResult<Account> {
        AccountRepository::create(self, AccountId::new(), &data, now).await
    }

    async fn update(
        &self,
        id: AccountId,
        changes: AccountChanges,
        now: DateTime<Utc>,
    ) -> AppResult<Account> {
        AccountRepository::update(self, id, &changes, now).await
    }

    async fn delete(&self, id: AccountId) -> AppResult<bool> {
        AccountRepository::delete(self, id).await
    }
}
