//! Job implementations run by the scheduler.

pub mod history_prune;

pub use history_prune::HistoryPruneJob;
