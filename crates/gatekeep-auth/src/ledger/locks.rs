//! Per-account serialization of authentication attempts.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use gatekeep_core::types::AccountId;

/// One async mutex per account, created on first use.
///
/// Holding the guard across the read, compare, write, and re-read steps
/// makes concurrent wrong attempts for the same account observe each
/// other's failures. Different accounts never contend.
#[derive(Debug, Default)]
pub struct AccountLocks {
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl AccountLocks {
    /// Creates an empty lock table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `account_id`.
    pub async fn acquire(&self, account_id: AccountId) -> OwnedMutexGuard<()> {
        // Clone the Arc out so the shard lock is not held across the await.
        let lock = self
            .locks
            .entry(account_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drops locks nobody currently holds or waits on. Returns how many.
    pub fn prune_idle(&self) -> usize {
        let before = self.locks.len();
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - self.locks.len()
    }

    /// Number of accounts with a lock entry.
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
