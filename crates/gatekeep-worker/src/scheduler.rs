//! Cron scheduler for periodic maintenance tasks.

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use gatekeep_core::config::WorkerConfig;
use gatekeep_core::error::AppError;

use crate::jobs::HistoryPruneJob;

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Schedule settings
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("config", &self.config)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {}", e)))?;

        Ok(Self { scheduler, config })
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {}", e)))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {}", e)))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    /// Login history prune, on the configured schedule
    pub async fn register_history_prune(&self, job: HistoryPruneJob) -> Result<(), AppError> {
        let schedule = self.config.history_prune_cron.as_str();
        let cron = CronJob::new_async(schedule, move |_uuid, _lock| {
            let job = job.clone();
            Box::pin(async move {
                if let Err(e) = job.run().await {
                    tracing::error!("Login history prune failed: {}", e);
                }
            })
        })
        .map_err(|e| {
            AppError::configuration(format!(
                "Invalid worker.history_prune_cron '{}': {}",
                schedule, e
            ))
        })?;

        self.scheduler.add(cron).await.map_err(|e| {
            AppError::internal(format!("Failed to add history_prune schedule: {}", e))
        })?;

        tracing::info!("Registered: history_prune ({})", schedule);
        Ok(())
    }
}
