//! Account repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_entity::account::{Account, AccountChanges, CreateAccount};

use super::storage_error;

/// Repository for account CRUD and lookup operations.
#[derive(Debug, Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by primary key.
    pub async fn find_by_id(&self, id: AccountId) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find account by id", e))
    }

    /// Find an account by its exact login name.
    pub async fn find_by_login(&self, login: &str) -> AppResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE login = $1")
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to find account by login", e))
    }

    /// Whether any account already uses the email or the login.
    pub async fn exists_by_email_or_login(&self, email: &str, login: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1 OR login = $2)",
        )
        .bind(email)
        .bind(login)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to check account uniqueness", e))
    }

    /// Whether an account other than `except` uses the email.
    pub async fn email_taken_by_other(&self, email: &str, except: AccountId) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM accounts WHERE email = $1 AND id <> $2)",
        )
        .bind(email)
        .bind(except)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("Failed to check email uniqueness", e))
    }

    /// Create a new account.
    pub async fn create(
        &self,
        id: AccountId,
        data: &CreateAccount,
        now: DateTime<Utc>,
    ) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, name, email, login, password_hash, dob, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $7) \
             RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.login)
        .bind(&data.password_hash)
        .bind(data.dob)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if matches!(
                    db_err.constraint(),
                    Some("accounts_email_key") | Some("accounts_login_key")
                ) =>
            {
                AppError::conflict("Email or login already used")
            }
            _ => storage_error("Failed to create account", e),
        })
    }

    /// Apply a partial update and return the updated row.
    pub async fn update(
        &self,
        id: AccountId,
        changes: &AccountChanges,
        now: DateTime<Utc>,
    ) -> AppResult<Account> {
        sqlx::query_as::<_, Account>(
            "UPDATE accounts SET name = COALESCE($2, name), \
                                 email = COALESCE($3, email), \
                                 password_hash = COALESCE($4, password_hash), \
                                 dob = COALESCE($5, dob), \
                                 updated_at = $6 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.password_hash)
        .bind(changes.dob)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("accounts_email_key") =>
            {
                AppError::conflict("Email already used")
            }
            _ => storage_error("Failed to update account", e),
        })?
        .ok_or_else(|| AppError::not_found(format!("Account {id} not found")))
    }

    /// Delete an account by ID. History rows cascade.
    pub async fn delete(&self, id: AccountId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("Failed to delete account", e))?;

        Ok(result.rows_affected() > 0)
    }
}
