//! Login attempt outcome enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a recorded login attempt succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "attempt_outcome", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttemptOutcome {
    /// The supplied credential matched.
    Success,
    /// The supplied credential did not match.
    Failure,
}

impl AttemptOutcome {
    /// Whether this is a failed attempt.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }

    /// Return the outcome as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
