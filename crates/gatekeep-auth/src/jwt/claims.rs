//! JWT claims carried by access tokens.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use gatekeep_core::types::AccountId;

/// Claims payload of an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account ID.
    pub sub: AccountId,
    /// Login name at issuance.
    pub login: String,
    /// Full name at issuance.
    pub name: String,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiration (seconds since epoch).
    pub exp: i64,
    /// Unique token ID.
    pub jti: Uuid,
}

impl Claims {
    /// The authenticated account.
    pub fn account_id(&self) -> AccountId {
        self.sub
    }

    /// Expiration as a timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}
