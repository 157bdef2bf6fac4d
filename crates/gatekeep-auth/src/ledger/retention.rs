//! Periodic pruning of old attempt history.

use std::sync::Arc;

use chrono::Duration;
use tracing::{debug, info};

use gatekeep_core::config::AuthConfig;
use gatekeep_core::result::AppResult;

use super::history::AttemptLedger;
use super::locks::AccountLocks;

/// Removes attempt records past the retention period.
///
/// Each account's most recent `threshold` records are always kept, so a
/// prune never changes what the lockout rule sees.
#[derive(Debug, Clone)]
pub struct HistoryRetention {
    ledger: Arc<AttemptLedger>,
    locks: Option<Arc<AccountLocks>>,
    max_age: Duration,
    keep_latest: usize,
}

impl HistoryRetention {
    /// Creates a retention job from auth configuration.
    pub fn new(
        ledger: Arc<AttemptLedger>,
        locks: Option<Arc<AccountLocks>>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            ledger,
            locks,
            max_age: config.history_retention(),
            keep_latest: config.lockout_threshold,
        }
    }

    /// Runs one prune cycle. Returns the number of records removed.
    pub async fn run_once(&self) -> AppResult<u64> {
        let removed = self
            .ledger
            .prune_older_than(self.max_age, self.keep_latest)
            .await?;

        if let Some(locks) = &self.locks {
            let idle = locks.prune_idle();
            debug!(idle_locks = idle, "Released idle account locks");
        }

        if removed > 0 {
            info!(
                removed,
                retention_days = self.max_age.num_days(),
                "Pruned login history"
            );
        }

        Ok(removed)
    }
}
