//! PostgreSQL connection pool management.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

use gatekeep_core::config::DatabaseConfig;
use gatekeep_core::error::{AppError, ErrorKind};

use crate::repositories::storage_error;

/// Wrapper around the sqlx PostgreSQL connection pool.
#[derive(Debug, Clone)]
pub struct DatabasePool {
    pool: PgPool,
}

impl DatabasePool {
    /// Create a new database pool from configuration.
    ///
    /// The acquire timeout doubles as the upper bound on every ledger
    /// and account-store call.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        info!(
            url = %mask_password(&config.url),
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
            .connect(&config.url)
            .await
            .map_err(|e| storage_error("Failed to connect to database", e))?;

        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Apply pending migrations from the workspace `migrations/` directory.
    pub async fn migrate(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, format!("Migration failed: {e}"), e)
            })?;
        info!("Database migrations complete");
        Ok(())
    }

    /// Return a reference to the underlying sqlx pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database connectivity.
    pub async fn health_check(&self) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| storage_error("Health check failed", e))
    }

    /// Close all connections in the pool.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Database pool closed");
    }
}

/// Mask the password portion of a database URL for safe logging.
fn mask_password(url: &str) -> String {
    let scheme_end = url.find("://").map(|p| p + 3).unwrap_or(0);
    match url.rfind('@') {
        Some(at) if at > scheme_end => match url[scheme_end..at].find(':') {
            Some(colon) => {
                let colon = scheme_end + colon;
                format!("{}:****{}", &url[..colon], &url[at..])
            }
            None => url.to_string(),
        },
        _ => url.to_string(),
    }
}
