//! Attempt record model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use gatekeep_core::types::AccountId;

use super::outcome::AttemptOutcome;

/// One immutable entry in an account's login history.
///
/// Records order by `attempted_at`; `seq` is assigned at insertion and
/// breaks ties between records with equal timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AttemptRecord {
    /// Insertion sequence number, unique across the store.
    pub seq: i64,
    /// The account the attempt was made against.
    pub account_id: AccountId,
    /// When the attempt was recorded.
    pub attempted_at: DateTime<Utc>,
    /// Whether the credential matched.
    pub outcome: AttemptOutcome,
}

impl AttemptRecord {
    /// Whether this record was a failed attempt.
    pub fn is_failure(&self) -> bool {
        self.outcome.is_failure()
    }
}

/// An attempt about to be appended; the store assigns `seq`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAttempt {
    /// The account the attempt was made against.
    pub account_id: AccountId,
    /// When the attempt happened.
    pub attempted_at: DateTime<Utc>,
    /// Whether the credential matched.
    pub outcome: AttemptOutcome,
}
