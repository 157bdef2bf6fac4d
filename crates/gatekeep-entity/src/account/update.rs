//! The closed set of account fields an owner may update.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A field name accepted by the account-update operation.
///
/// Update requests are checked key-by-key against this set; any key
/// outside it rejects the whole request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdatableField {
    /// Full name.
    #[serde(rename = "name")]
    Name,
    /// Email address.
    #[serde(rename = "email")]
    Email,
    /// New password; requires [`UpdatableField::OldPassword`].
    #[serde(rename = "password")]
    Password,
    /// Date of birth.
    #[serde(rename = "dob")]
    Dob,
    /// Current password, used only to authorize a password change.
    #[serde(rename = "oldPassword")]
    OldPassword,
}

impl UpdatableField {
    /// Every accepted field.
    pub const ALL: [UpdatableField; 5] = [
        Self::Name,
        Self::Email,
        Self::Password,
        Self::Dob,
        Self::OldPassword,
    ];

    /// The wire name of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::Dob => "dob",
            Self::OldPassword => "oldPassword",
        }
    }

    /// Whether the field is written to the account row.
    pub fn is_persisted(&self) -> bool {
        !matches!(self, Self::OldPassword)
    }
}

impl fmt::Display for UpdatableField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UpdatableField {
    type Err = gatekeep_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                gatekeep_core::AppError::validation(
                    "You are trying to update data you are not allowed to",
                )
            })
    }
}
