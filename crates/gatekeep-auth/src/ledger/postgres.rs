//! PostgreSQL-backed attempt store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_core::types::pagination::{PageRequest, PageResponse};
use gatekeep_database::repositories::LoginHistoryRepository;
use gatekeep_entity::attempt::{AttemptRecord, NewAttempt};

use super::store::AttemptStore;

#[async_trait]
impl AttemptStore for LoginHistoryRepository {
    async fn append(&self, attempt: NewAttempt) -> AppResult<AttemptRecord> {
        LoginHistoryRepository::append(self, &attempt).await
    }

    async fn recent(&self, account_id: AccountId, limit: usize) -> AppResult<Vec<AttemptRecord>> {
        self.find_recent(account_id, limit).await
    }

    async fn page(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttemptRecord>> {
        self.find_page(account_id, page).await
    }

    async fn prune_before(&self, cutoff: DateTime<Utc>, keep_latest: usize) -> AppResult<u64> {
        self.delete_before(cutoff, keep_latest).await
    }

    async fn purge_account(&self, account_id: AccountId) -> AppResult<u64> {
        self.delete_for_account(account_id).await
    }
}
