//! Account self-service operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use validator::ValidateEmail;

use gatekeep_auth::{AccountStore, AttemptLedger, PasswordHasher, PasswordValidator};
use gatekeep_core::Clock;
use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;
use gatekeep_entity::account::{Account, AccountChanges, AccountProfile, CreateAccount, UpdatableField};

use super::input::{CreateAccountRequest, INVALID_EMAIL, parse_dob};
use crate::context::RequestContext;

/// Result of a successful profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountUpdated {
    /// Confirmation message.
    pub message: String,
    /// The profile after the update.
    pub user: AccountProfile,
}

/// Registers, updates, and deletes accounts.
#[derive(Debug, Clone)]
pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    ledger: Arc<AttemptLedger>,
    hasher: Arc<PasswordHasher>,
    validator: Arc<PasswordValidator>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<AttemptLedger>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            accounts,
            ledger,
            hasher,
            validator,
            clock,
        }
    }

    /// Registers a new account.
    pub async fn create_account(&self, req: CreateAccountRequest) -> AppResult<Account> {
        req.check()?;
        let dob = parse_dob(&req.dob)?;

        if self
            .accounts
            .exists_by_email_or_login(&req.email, &req.login)
            .await?
        {
            return Err(AppError::conflict("Email or login already used"));
        }

        self.validator.validate(&req.password)?;
        let password_hash = self.hash(req.password).await?;

        let account = self
            .accounts
            .create(
                CreateAccount {
                    name: req.name,
                    email: req.email,
                    login: req.login,
                    password_hash,
                    dob,
                },
                self.clock.now(),
            )
            .await?;

        info!(account_id = %account.id, login = %account.login, "Account created");

        Ok(account)
    }

    /// Applies an owner's partial update.
    ///
    /// Every key in `body` must name an [`UpdatableField`]. Changing the
    /// password requires `oldPassword`, which is checked and discarded.
    pub async fn update_account(
        &self,
        ctx: &RequestContext,
        body: Map<String, Value>,
    ) -> AppResult<AccountUpdated> {
        if body.is_empty() {
            return Err(AppError::validation("Please provide data to us."));
        }

        let mut fields = Vec::with_capacity(body.len());
        for (key, value) in &body {
            fields.push((key.parse::<UpdatableField>()?, value));
        }

        let mut changes = AccountChanges::default();
        let mut new_password = None;
        let mut old_password = None;

        for (field, value) in fields {
            let text = string_value(field, value)?;
            match field {
                UpdatableField::Name => changes.name = Some(text.to_string()),
                UpdatableField::Email => {
                    let email = text.to_string();
                    if !email.validate_email() {
                        return Err(AppError::validation(INVALID_EMAIL));
                    }
                    changes.email = Some(email);
                }
                UpdatableField::Dob => changes.dob = Some(parse_dob(text)?),
                UpdatableField::Password => new_password = Some(text.to_string()),
                UpdatableField::OldPassword => old_password = Some(text.to_string()),
            }
        }

        let account = self.current_account(ctx).await?;

        if let Some(password) = new_password {
            let Some(old_password) = old_password else {
                return Err(AppError::validation(
                    "To update the password, you need to provide the old password.",
                ));
            };

            if !self
                .verify(old_password, account.password_hash.clone())
                .await?
            {
                return Err(AppError::validation("The old password does not match"));
            }

            self.validator.validate(&password)?;
            changes.password_hash = Some(self.hash(password).await?);
        }

        if let Some(email) = &changes.email {
            if self.accounts.email_taken_by_other(email, account.id).await? {
                return Err(AppError::conflict("Email already used"));
            }
        }

        let updated = if changes.is_empty() {
            account
        } else {
            self.accounts
                .update(account.id, changes, self.clock.now())
                .await?
        };

        info!(account_id = %updated.id, "Account updated");

        Ok(AccountUpdated {
            message: "Your credentials have been updated successfully.".to_string(),
            user: updated.profile(),
        })
    }

    /// Deletes the caller's account and its login history.
    pub async fn delete_account(&self, ctx: &RequestContext) -> AppResult<()> {
        if !self.accounts.delete(ctx.account_id).await? {
            return Err(AppError::not_found("Account not found"));
        }

        let purged = self.ledger.purge_account(ctx.account_id).await?;

        info!(
            account_id = %ctx.account_id,
            purged_attempts = purged,
            "Account deleted"
        );

        Ok(())
    }

    /// Loads the caller's account.
    pub async fn current_account(&self, ctx: &RequestContext) -> AppResult<Account> {
        self.accounts
            .find_by_id(ctx.account_id)
            .await?
            .ok_or_else(|| AppError::not_found("Account not found"))
    }

    async fn verify(&self, password: String, stored_hash: String) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.verify_password(&password, &stored_hash))
            .await
            .map_err(|e| AppError::internal(format!("Password check task failed: {e}")))?
    }

    async fn hash(&self, password: String) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        tokio::task::spawn_blocking(move || hasher.hash_password(&password))
            .await
            .map_err(|e| AppError::internal(format!("Password hashing task failed: {e}")))?
    }
}

fn string_value(field: UpdatableField, value: &Value) -> AppResult<&str> {
    match value.as_str() {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(AppError::validation(format!("Invalid value for {field}"))),
    }
}

#[cfg(test)]
mod tests {
    use argon2::Params;
    use serde_json::json;

    use gatekeep_auth::{MemoryAccountStore, MemoryAttemptStore};
    use gatekeep_core::config::AuthConfig;
    use gatekeep_core::error::ErrorKind;
    use gatekeep_core::ManualClock;
    use gatekeep_entity::attempt::AttemptOutcome;

    use super::*;

    struct Fixture {
        service: AccountService,
        ledger: Arc<AttemptLedger>,
        hasher: Arc<PasswordHasher>,
    }

    fn fixture() -> Fixture {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::default());
        let ledger = Arc::new(AttemptLedger::new(
            Arc::new(MemoryAttemptStore::new()),
            Arc::clone(&clock),
        ));
        let hasher = Arc::new(PasswordHasher::with_params(
            Params::new(1024, 1, 1, None).unwrap(),
        ));
        let service = AccountService::new(
            Arc::new(MemoryAccountStore::new()),
            Arc::clone(&ledger),
            Arc::clone(&hasher),
            Arc::new(PasswordValidator::new(&AuthConfig::default())),
            clock,
        );
        Fixture {
            service,
            ledger,
            hasher,
        }
    }

    fn request(login: &str, email: &str) -> CreateAccountRequest {
        CreateAccountRequest {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "analytical-engine".to_string(),
            login: login.to_string(),
            dob: "1815-12-10".to_string(),
        }
    }

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let f = fixture();
        let account = f
            .service
            .create_account(request("ada", "ada@example.com"))
            .await
            .unwrap();

        assert_ne!(account.password_hash, "analytical-engine");
        assert!(f
            .hasher
            .verify_password("analytical-engine", &account.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicates() {
        let f = fixture();
        f.service
            .create_account(request("ada", "ada@example.com"))
            .await
            .unwrap();

        let err = f
            .service
            .create_account(request("ada", "other@example.com"))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Conflict);
        assert_eq!(err.message, "Email or login already used");
    }

    #[tokio::test]
    async fn test_update_rejects_unknown_and_empty_bodies() {
        let f = fixture();
        let account = f
            .service
            .create_account(request("ada", "ada@example.com"))
            .await
            .unwrap();
        let ctx = RequestContext::new(account.id, "ada");

        let err = f.service.update_account(&ctx, Map::new()).await.unwrap_err();
        assert_eq!(err.message, "Please provide data to us.");

        let err = f
            .service
            .update_account(&ctx, body(json!({"name": "A", "login": "hijack"})))
            .await
            .unwrap_err();
        assert_eq!(err.message, "You are trying to update data you are not allowed to");
    }

    #[tokio::test]
    async fn test_update_profile_fields() {
        let f = fixture();
        let account = f
            .service
            .create_account(request("ada", "ada@example.com"))
            .await
            .unwrap();
        let ctx = RequestContext::new(account.id, "ada");

        let updated = f
            .service
            .update_account(
                &ctx,
                body(json!({"name": "Augusta Ada King", "dob": "1815-12-11"})),
            )
            .await
            .unwrap();
        assert_eq!(updated.user.name, "Augusta Ada King");
        assert_eq!(updated.user.email, "ada@example.com");
        assert_eq!(updated.user.dob.to_string(), "1815-12-11");

        let err = f
            .service
            .update_account(&ctx, body(json!({"email": "nope"})))
            .await
            .unwrap_err();
        assert_eq!(err.message, INVALID_EMAIL);
    }

    #[tokio::test]
    async fn test_password_change_requires_matching_old_password() {
        let f = fixture();
        let account = f
            .service
            .create_account(request("ada", "ada@example.com"))
            .await
            .unwrap();
        let ctx = RequestContext::new(account.id, "ada");

        let err = f
            .service
            .update_account(&ctx, body(json!({"password": "difference-engine"})))
            .await
            .unwrap_err();
        assert_eq!(
            err.message,
            "To update the password, you need to provide the old password."
        );

        let err = f
            .service
            .update_account(
                &ctx,
                body(json!({"password": "difference-engine", "oldPassword": "wrong"})),
            )
            .await
            .unwrap_err();
        assert_eq!(err.message, "The old password does not match");

        f.service
            .update_account(
                &ctx,
                body(json!({"password": "difference-engine", "oldPassword": "analytical-engine"})),
            )
            .await
            .unwrap();

        let stored = f.service.current_account(&ctx).await.unwrap();
        assert!(f
            .hasher
            .verify_password("difference-engine", &stored.password_hash)
            .unwrap());
    }

    #[tokio::test]
    async fn test_old_password_alone_changes_nothing() {
        let f = fixture();
        let account = f
            .service
            .create_account(request("ada", "ada@example.com"))
            .await
            .unwrap();
        let ctx = RequestContext::new(account.id, "ada");

        let updated = f
            .service
            .update_account(&ctx, body(json!({"oldPassword": "whatever"})))
            .await
            .unwrap();
        assert_eq!(updated.user, account.profile());
    }

    #[tokio::test]
    async fn test_delete_purges_history() {
        let f = fixture();
        let account = f
            .service
            .create_account(request("ada", "ada@example.com"))
            .await
            .unwrap();
        f.ledger
            .record_attempt(account.id, AttemptOutcome::Failure)
            .await
            .unwrap();
        let ctx = RequestContext::new(account.id, "ada");

        f.service.delete_account(&ctx).await.unwrap();

        assert!(f.ledger.recent_attempts(account.id, 10).await.unwrap().is_empty());
        let err = f.service.delete_account(&ctx).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
