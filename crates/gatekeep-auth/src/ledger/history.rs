//! The attempt ledger: clock-stamped access to an [`AttemptStore`].

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use gatekeep_core::Clock;
use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_core::types::pagination::{PageRequest, PageResponse};
use gatekeep_entity::attempt::{AttemptOutcome, AttemptRecord, NewAttempt};

use super::store::AttemptStore;

/// Append-only record of login attempts per account.
///
/// The ledger owns timestamping: callers never choose when an attempt
/// happened. Storage errors propagate unchanged and are never retried.
#[derive(Debug, Clone)]
pub struct AttemptLedger {
    store: Arc<dyn AttemptStore>,
    clock: Arc<dyn Clock>,
}

impl AttemptLedger {
    /// Creates a ledger over the given store and clock.
    pub fn new(store: Arc<dyn AttemptStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// The ledger clock's current time.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Appends an attempt stamped with the current time.
    pub async fn record_attempt(
        &self,
        account_id: AccountId,
        outcome: AttemptOutcome,
    ) -> AppResult<AttemptRecord> {
        let record = self
            .store
            .append(NewAttempt {
                account_id,
                attempted_at: self.clock.now(),
                outcome,
            })
            .await?;

        debug!(
            account_id = %account_id,
            seq = record.seq,
            outcome = %record.outcome,
            "Recorded login attempt"
        );

        Ok(record)
    }

    /// Up to `limit` most recent attempts, newest first.
    pub async fn recent_attempts(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> AppResult<Vec<AttemptRecord>> {
        self.store.recent(account_id, limit).await
    }

    /// One page of an account's history, newest first.
    pub async fn history(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttemptRecord>> {
        self.store.page(account_id, page).await
    }

    /// Prunes records older than `max_age`, sparing each account's
    /// `keep_latest` most recent.
    pub async fn prune_older_than(&self, max_age: Duration, keep_latest: usize) -> AppResult<u64> {
        let cutoff = self.clock.now() - max_age;
        self.store.prune_before(cutoff, keep_latest).await
    }

    /// Drops an account's entire history.
    pub async fn purge_account(&self, account_id: AccountId) -> AppResult<u64> {
        self.store.purge_account(account_id).await
    }
}
