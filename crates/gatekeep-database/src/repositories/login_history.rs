//! Login history repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_core::types::pagination::{PageRequest, PageResponse};
use gatekeep_entity::attempt::{AttemptRecord, NewAttempt};

use super::storage_error;

/// Recency order: newest first, later insertion first on equal timestamps.
const RECENCY_ORDER: &str = "ORDER BY attempted_at DESC, seq DESC";

/// Append-only repository over the `login_history` table.
#[derive(Debug, Clone)]
pub struct LoginHistoryRepository {
    pool: PgPool,
}

impl LoginHistoryRepository {
    /// Create a new login history repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a record and return it with its assigned sequence number.
    pub async fn append(&self, attempt: &NewAttempt) -> AppResult<AttemptRecord> {
        sqlx::query_as::<_, AttemptRecord>(
            "INSERT INTO login_history (account_id, attempted_at, outcome) \
             VALUES ($1, $2, $3) \
             RETURNING seq, account_id, attempted_at, outcome",
        )
        .bind(attempt.account_id)
        .bind(attempt.attempted_at)
        .bind(attempt.outcome)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to record login attempt", e))
    }

    /// The `limit` most recent records for an account, newest first.
    pub async fn find_recent(
        &self,
        account_id: AccountId,
        limit: usize,
    ) -> AppResult<Vec<AttemptRecord>> {
        sqlx::query_as::<_, AttemptRecord>(&format!(
            "SELECT seq, account_id, attempted_at, outcome FROM login_history \
             WHERE account_id = $1 {RECENCY_ORDER} LIMIT $2"
        ))
        .bind(account_id)
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to fetch recent login attempts", e))
    }

    /// One page of an account's history, newest first.
    pub async fn find_page(
        &self,
        account_id: AccountId,
        page: PageRequest,
    ) -> AppResult<PageResponse<AttemptRecord>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM login_history WHERE account_id = $1")
                .bind(account_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| storage_error("Failed to count login history", e))?;

        let records = sqlx::query_as::<_, AttemptRecord>(&format!(
            "SELECT seq, account_id, attempted_at, outcome FROM login_history \
             WHERE account_id = $1 {RECENCY_ORDER} LIMIT $2 OFFSET $3"
        ))
        .bind(account_id)
        .bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
        .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to list login history", e))?;

        Ok(PageResponse::new(records, page, total as u64))
    }

    /// Delete records older than `cutoff`, sparing each account's
    /// `keep_latest` most recent records.
    pub async fn delete_before(&self, cutoff: DateTime<Utc>, keep_latest: usize) -> AppResult<u64> {
        let result = sqlx::query(
            "WITH ranked AS ( \
                 SELECT seq, ROW_NUMBER() OVER ( \
                     PARTITION BY account_id ORDER BY attempted_at DESC, seq DESC \
                 ) AS position \
                 FROM login_history \
             ) \
             DELETE FROM login_history h USING ranked r \
             WHERE h.seq = r.seq AND r.position > $2 AND h.attempted_at < $1",
        )
        .bind(cutoff)
        .bind(keep_latest as i64)
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to prune login history", e))?;
        Ok(result.rows_affected())
    }

    /// Delete an account's entire history.
    pub async fn delete_for_account(&self, account_id: AccountId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM login_history WHERE account_id = $1")
            .bind(account_id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to purge login history", e))?;
        Ok(result.rows_affected())
    }
}
