//! Repository implementations for Gatekeep entities.

pub mod account;
pub mod login_history;

pub use account::AccountRepository;
pub use login_history::LoginHistoryRepository;

use gatekeep_core::error::{AppError, ErrorKind};

/// Map a sqlx error, separating "could not reach the database" from
/// query-level failures.
pub(crate) fn storage_error(context: &str, err: sqlx::Error) -> AppError {
    let kind = match &err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::WorkerCrashed => ErrorKind::StorageUnavailable,
        _ => ErrorKind::Database,
    };
    AppError::with_source(kind, context.to_string(), err)
}
