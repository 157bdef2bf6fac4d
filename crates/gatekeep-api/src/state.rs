//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use gatekeep_auth::{
    AccountLocks, AccountStore, AttemptLedger, AttemptStore, CredentialVerifier, HistoryRetention,
    JwtDecoder, JwtEncoder, LockoutPolicy, LoginGuard, MemoryAccountStore, MemoryAttemptStore,
    PasswordHasher, PasswordValidator,
};
use gatekeep_core::Clock;
use gatekeep_core::config::AppConfig;
use gatekeep_database::{AccountRepository, DatabasePool, LoginHistoryRepository};
use gatekeep_service::{AccountService, HistoryService, LoginService};

/// The account store and attempt storage the services run against.
#[derive(Debug, Clone)]
pub struct Backends {
    /// Account lookup and persistence.
    pub accounts: Arc<dyn AccountStore>,
    /// Login attempt history.
    pub attempts: Arc<dyn AttemptStore>,
    /// The pool behind both stores, when they are PostgreSQL-backed.
    pub database: Option<DatabasePool>,
}

impl Backends {
    /// In-process stores; nothing survives a restart.
    pub fn memory() -> Self {
        Self {
            accounts: Arc::new(MemoryAccountStore::new()),
            attempts: Arc::new(MemoryAttemptStore::new()),
            database: None,
        }
    }

    /// PostgreSQL repositories sharing one pool.
    pub fn postgres(database: DatabasePool) -> Self {
        let pool = database.pool().clone();
        Self {
            accounts: Arc::new(AccountRepository::new(pool.clone())),
            attempts: Arc::new(LoginHistoryRepository::new(pool)),
            database: Some(database),
        }
    }
}

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Database pool, absent with the memory backend
    pub database: Option<DatabasePool>,
    /// Access token validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Login attempt ledger
    pub ledger: Arc<AttemptLedger>,
    /// The login guard
    pub guard: Arc<LoginGuard>,
    /// History retention, driven by the worker
    pub retention: Arc<HistoryRetention>,
    /// Registration, profile updates, deletion
    pub account_service: Arc<AccountService>,
    /// Login and token issuance
    pub login_service: Arc<LoginService>,
    /// Login history listing
    pub history_service: Arc<HistoryService>,
}

impl AppState {
    /// Wires services over the given backends.
    pub fn new(
        config: AppConfig,
        backends: Backends,
        clock: Arc<dyn Clock>,
        hasher: PasswordHasher,
    ) -> Self {
        let auth = &config.auth;

        let ledger = Arc::new(AttemptLedger::new(
            Arc::clone(&backends.attempts),
            Arc::clone(&clock),
        ));
        let hasher = Arc::new(hasher);
        let locks = auth
            .serialize_per_account
            .then(|| Arc::new(AccountLocks::new()));

        let mut guard = LoginGuard::new(
            Arc::clone(&backends.accounts),
            Arc::clone(&ledger),
            Arc::clone(&hasher) as Arc<dyn CredentialVerifier>,
            LockoutPolicy::from_config(auth),
        );
        if let Some(locks) = &locks {
            guard = guard.with_account_locks(Arc::clone(locks));
        }
        let guard = Arc::new(guard);

        let retention = Arc::new(HistoryRetention::new(
            Arc::clone(&ledger),
            locks.clone(),
            auth,
        ));

        let account_service = Arc::new(AccountService::new(
            Arc::clone(&backends.accounts),
            Arc::clone(&ledger),
            Arc::clone(&hasher),
            Arc::new(PasswordValidator::new(auth)),
            Arc::clone(&clock),
        ));
        let login_service = Arc::new(LoginService::new(
            Arc::clone(&guard),
            Arc::new(JwtEncoder::new(auth)),
        ));
        let history_service = Arc::new(HistoryService::new(
            Arc::clone(&ledger),
            auth.history_page_size,
        ));

        Self {
            jwt_decoder: Arc::new(JwtDecoder::new(auth)),
            database: backends.database,
            ledger,
            guard,
            retention,
            account_service,
            login_service,
            history_service,
            config: Arc::new(config),
        }
    }
}
