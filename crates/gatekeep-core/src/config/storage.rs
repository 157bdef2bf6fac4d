//! Backend selection for the account store and attempt storage.

use serde::{Deserialize, Serialize};

/// Which backend holds accounts and login attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// PostgreSQL via sqlx.
    #[default]
    Postgres,
    /// Process-local maps. Single node only; history is lost on restart.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Selected backend.
    #[serde(default)]
    pub backend: StorageBackend,
}
