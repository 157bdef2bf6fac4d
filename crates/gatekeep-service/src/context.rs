//! The authenticated caller of a request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use gatekeep_core::types::AccountId;

/// Who is making the current request.
///
/// Built by the HTTP layer from a validated access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated account.
    pub account_id: AccountId,
    /// Login name from the token.
    pub login: String,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a context stamped with the current time.
    pub fn new(account_id: AccountId, login: impl Into<String>) -> Self {
        Self {
            account_id,
            login: login.into(),
            request_time: Utc::now(),
        }
    }
}
