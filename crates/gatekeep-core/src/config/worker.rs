//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Scheduled maintenance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether scheduled jobs run in this process.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Six-field cron expression for the attempt-history retention job.
    #[serde(default = "default_history_prune_cron")]
    pub history_prune_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            history_prune_cron: default_history_prune_cron(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_history_prune_cron() -> String {
    "0 0 * * * *".to_string()
}
