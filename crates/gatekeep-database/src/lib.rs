//! # gatekeep-database
//!
//! PostgreSQL connection management and concrete repository
//! implementations for accounts and login history.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{AccountRepository, LoginHistoryRepository};
