//! Convenience result type alias for Gatekeep.

use crate::error::AppError;

/// A specialized `Result` type for Gatekeep operations.
pub type AppResult<T> = Result<T, AppError>;
