//! Scheduled maintenance for Gatekeep.
//!
//! This crate provides:
//! - A cron scheduler that owns the periodic tasks
//! - The login-history prune job

pub mod jobs;
pub mod scheduler;

pub use jobs::HistoryPruneJob;
pub use scheduler::CronScheduler;
