//! Request DTOs.

use serde::{Deserialize, Serialize};

pub use gatekeep_service::{CreateAccountRequest, LoginRequest};

/// Query string of the login-history listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    /// 1-based page number; the first page when absent.
    pub page: Option<u64>,
}
