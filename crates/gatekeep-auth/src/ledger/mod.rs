//! Append-only login attempt history.
//!
//! The ledger stamps every attempt with the shared [`Clock`] and hands it
//! to an [`AttemptStore`]. Two stores exist: PostgreSQL for deployments
//! and an in-process map for tests and single-node setups.
//!
//! [`Clock`]: gatekeep_core::Clock

pub mod history;
pub mod locks;
pub mod memory;
pub mod postgres;
pub mod retention;
pub mod store;

pub use history::AttemptLedger;
pub use locks::AccountLocks;
pub use memory::MemoryAttemptStore;
pub use retention::HistoryRetention;
pub use store::AttemptStore;
