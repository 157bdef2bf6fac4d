//! Attempt storage trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_core::types::pagination::{PageRequest, PageResponse};
use gatekeep_entity::attempt::{AttemptRecord, NewAttempt};

/// Durable, append-only storage for login attempts.
///
/// Implementations must order reads newest first by `attempted_at`,
/// falling back to descending `seq` when timestamps are equal. Any
/// connectivity failure surfaces as a storage-unavailable error.
#[async_trait]
pub trait AttemptStore: Send + Sync + std::fmt::Debug {
    /// Persist an attempt and return it with its assigned sequence number.
    async fn append(&self, attempt: NewAttempt) -> AppResult<AttemptRecord>;

    /// Up to `limit` most recent records for an account, newest first.
    async fn recent(&self, account_id: AccountId, limit: usize) -> AppResult<Vec<AttemptRecord>>;

    /// One page of an account's history, newest first.
    async fn page(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttemptRecord>>;

    /// Remove records stamped before `cutoff`, except each account's
    /// `keep_latest` most recent. Returns the count removed.
    async fn prune_before(&self, cutoff: DateTime<Utc>, keep_latest: usize) -> AppResult<u64>;

    /// Remove an account's whole history. Returns the count removed.
    async fn purge_account(&self, account_id: AccountId) -> AppResult<u64>;
}
