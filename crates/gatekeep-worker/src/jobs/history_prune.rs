//! Prunes login history past the retention period.

use std::sync::Arc;

use gatekeep_auth::HistoryRetention;
use gatekeep_core::result::AppResult;

/// Runs one retention pass per invocation.
#[derive(Debug, Clone)]
pub struct HistoryPruneJob {
    retention: Arc<HistoryRetention>,
}

impl HistoryPruneJob {
    /// Create a new prune job.
    pub fn new(retention: Arc<HistoryRetention>) -> Self {
        Self { retention }
    }

    /// Run the job once, returning the number of records removed.
    pub async fn run(&self) -> AppResult<u64> {
        tracing::debug!("Running login history prune");
        let removed = self.retention.run_once().await?;
        tracing::debug!("Login history prune removed {} records", removed);
        Ok(removed)
    }
}
