//! In-memory attempt store for tests and single-node deployments.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_core::types::pagination::{PageRequest, PageResponse};
use gatekeep_entity::attempt::{AttemptRecord, NewAttempt};

use super::store::AttemptStore;

/// Attempt store holding each account's history in a sorted vector.
///
/// Each vector is kept in ascending `(attempted_at, seq)` order so recency
/// reads walk it backwards. History does not survive a restart.
#[derive(Debug, Default)]
pub struct MemoryAttemptStore {
    records: DashMap<AccountId, Vec<AttemptRecord>>,
    next_seq: AtomicI64,
}

impl MemoryAttemptStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total records held across all accounts.
    pub fn len(&self) -> usize {
        self.records.iter().map(|entry| entry.value().len()).sum()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl AttemptStore for MemoryAttemptStore {
    async fn append(&self, attempt: NewAttempt) -> AppResult<AttemptRecord> {
        let record = AttemptRecord {
            seq: self.next_seq.fetch_add(1, Ordering::SeqCst) + 1,
            account_id: attempt.account_id,
            attempted_at: attempt.attempted_at,
            outcome: attempt.outcome,
        };

        let mut history = self.records.entry(record.account_id).or_default();
        // A record stamped earlier than existing ones (clock stepped back)
        // still lands in timestamp order.
        let at = history.partition_point(|r| {
            (r.attempted_at, r.seq) <= (record.attempted_at, record.seq)
        });
        history.insert(at, record.clone());

        Ok(record)
    }

    async fn recent(&self, account_id: AccountId, limit: usize) -> AppResult<Vec<AttemptRecord>> {
        Ok(self
            .records
            .get(&account_id)
            .map(|history| history.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn page(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttemptRecord>> {
        let (items, total) = match self.records.get(&account_id) {
            Some(history) => {
                let items = history
                    .iter()
                    .rev()
                    .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
                    .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
                    .cloned()
                    .collect();
                (items, history.len() as u64)
            }
            None => (Vec::new(), 0),
        };

        Ok(PageResponse::new(items, page, total))
    }

    async fn prune_before(&self, cutoff: DateTime<Utc>, keep_latest: usize) -> AppResult<u64> {
        let mut removed = 0u64;
        for mut entry in self.records.iter_mut() {
            let history = entry.value_mut();
            let prunable = history.len().saturating_sub(keep_latest);
            // Ascending order: the stale records are a prefix.
            let stale = history[..prunable].partition_point(|r| r.attempted_at < cutoff);
            history.drain(..stale);
            removed += stale as u64;
        }
        self.records.retain(|_, history| !history.is_empty());
        Ok(removed)
    }

    async fn purge_account(&self, account_id: AccountId) -> AppResult<u64> {
        Ok(self
            .records
            .remove(&account_id)
            .map(|(_, history)| history.len() as u64)
            .unwrap_or(0))
    }
}
