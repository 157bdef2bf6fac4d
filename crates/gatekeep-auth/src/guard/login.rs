//! The login guard: lockout check, credential comparison, attempt recording.

use std::sync::Arc;

use tracing::{debug, info, warn};

use gatekeep_core::error::AppError;
use gatekeep_core::result::AppResult;
use gatekeep_core::types::AccountId;
use gatekeep_entity::attempt::AttemptOutcome;

use crate::account::AccountStore;
use crate::ledger::{AccountLocks, AttemptLedger};
use crate::password::CredentialVerifier;

use super::policy::{LockoutPolicy, LockoutState};
use super::result::{AuthResult, DenyReason, SessionSubject};

/// Decides whether a login may proceed.
///
/// Every call that reaches credential comparison appends exactly one
/// attempt to the ledger. Calls refused by an active lockout append
/// nothing, so the window is measured from the last real failure.
#[derive(Debug, Clone)]
pub struct LoginGuard {
    accounts: Arc<dyn AccountStore>,
    ledger: Arc<AttemptLedger>,
    verifier: Arc<dyn CredentialVerifier>,
    policy: LockoutPolicy,
    locks: Option<Arc<AccountLocks>>,
}

impl LoginGuard {
    /// Creates a guard without per-account serialization.
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        ledger: Arc<AttemptLedger>,
        verifier: Arc<dyn CredentialVerifier>,
        policy: LockoutPolicy,
    ) -> Self {
        Self {
            accounts,
            ledger,
            verifier,
            policy,
            locks: None,
        }
    }

    /// Serializes concurrent authentications for the same account.
    pub fn with_account_locks(mut self, locks: Arc<AccountLocks>) -> Self {
        self.locks = Some(locks);
        self
    }

    /// The lockout rule in force.
    pub fn policy(&self) -> LockoutPolicy {
        self.policy
    }

    /// Authenticates `login` with `secret`.
    ///
    /// Policy denials come back as [`AuthResult::Denied`]; only storage
    /// and internal failures are errors.
    pub async fn authenticate(&self, login: &str, secret: &str) -> AppResult<AuthResult> {
        let Some(account) = self.accounts.find_by_login(login).await? else {
            debug!(login = %login, "Login for unknown account");
            self.verify_decoy(secret).await;
            return Ok(AuthResult::Denied(DenyReason::InvalidCredential));
        };

        let _guard = match &self.locks {
            Some(locks) => Some(locks.acquire(account.id).await),
            None => None,
        };

        if let LockoutState::Locked { remaining_seconds } = self.lockout_state(account.id).await? {
            info!(
                account_id = %account.id,
                remaining_seconds,
                "Login refused: account locked"
            );
            return Ok(AuthResult::Denied(DenyReason::LockedOut { remaining_seconds }));
        }

        if self.verify(secret, &account.password_hash).await? {
            self.ledger
                .record_attempt(account.id, AttemptOutcome::Success)
                .await?;
            info!(account_id = %account.id, "Login succeeded");
            return Ok(AuthResult::Allowed(SessionSubject::from(&account)));
        }

        self.ledger
            .record_attempt(account.id, AttemptOutcome::Failure)
            .await?;

        // Re-read so the failure just recorded can trip the lockout.
        match self.lockout_state(account.id).await? {
            LockoutState::Locked { remaining_seconds } => {
                warn!(
                    account_id = %account.id,
                    threshold = self.policy.threshold(),
                    remaining_seconds,
                    "Account locked after repeated failures"
                );
                Ok(AuthResult::Denied(DenyReason::LockedOut { remaining_seconds }))
            }
            LockoutState::Clear => {
                info!(account_id = %account.id, "Login failed: invalid credential");
                Ok(AuthResult::Denied(DenyReason::InvalidCredential))
            }
        }
    }

    /// Current lockout state for an account.
    pub async fn lockout_state(&self, account_id: AccountId) -> AppResult<LockoutState> {
        let recent = self
            .ledger
            .recent_attempts(account_id, self.policy.threshold())
            .await?;
        Ok(self.policy.evaluate(&recent, self.ledger.now()))
    }

    /// Pays for one comparison against the verifier's decoy hash.
    async fn verify_decoy(&self, secret: &str) {
        let verifier = Arc::clone(&self.verifier);
        let secret = secret.to_owned();

        if let Err(e) = tokio::task::spawn_blocking(move || verifier.match_decoy(&secret)).await {
            warn!(error = %e, "Decoy credential check task failed");
        }
    }

    /// Runs the comparison off the async runtime; hashing is CPU-bound.
    async fn verify(&self, secret: &str, stored_hash: &str) -> AppResult<bool> {
        let verifier = Arc::clone(&self.verifier);
        let secret = secret.to_owned();
        let stored_hash = stored_hash.to_owned();

        tokio::task::spawn_blocking(move || verifier.matches(&secret, &stored_hash))
            .await
            .map_err(|e| AppError::internal(format!("Credential check task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, NaiveDate, Utc};

    use gatekeep_core::error::ErrorKind;
    use gatekeep_core::types::pagination::{PageRequest, PageResponse};
    use gatekeep_core::{Clock, ManualClock};
    use gatekeep_entity::account::CreateAccount;
    use gatekeep_entity::attempt::{AttemptRecord, NewAttempt};

    use super::*;
    use crate::account::MemoryAccountStore;
    use crate::ledger::{AttemptStore, MemoryAttemptStore};

    /// Treats the stored "hash" as the plaintext.
    #[derive(Debug)]
    struct PlainVerifier;

    impl CredentialVerifier for PlainVerifier {
        fn matches(&self, supplied: &str, stored_hash: &str) -> AppResult<bool> {
            Ok(supplied == stored_hash)
        }
    }

    /// Counts decoy comparisons; real comparisons always fail.
    #[derive(Debug, Default)]
    struct DecoyCounter {
        decoys: std::sync::atomic::AtomicUsize,
    }

    impl CredentialVerifier for DecoyCounter {
        fn matches(&self, _supplied: &str, _stored_hash: &str) -> AppResult<bool> {
            Ok(false)
        }

        fn match_decoy(&self, _supplied: &str) {
            self.decoys
                .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        }
    }

    /// An attempt store whose backend is down.
    #[derive(Debug)]
    struct UnreachableStore;

    #[async_trait]
    impl AttemptStore for UnreachableStore {
        async fn append(&self, _attempt: NewAttempt) -> AppResult<AttemptRecord> {
            Err(AppError::storage_unavailable("attempt storage offline"))
        }

        async fn recent(&self, _id: AccountId, _limit: usize) -> AppResult<Vec<AttemptRecord>> {
            Err(AppError::storage_unavailable("attempt storage offline"))
        }

        async fn page(
            &self,
            _id: AccountId,
            _page: PageRequest,
        ) -> AppResult<PageResponse<AttemptRecord>> {
            Err(AppError::storage_unavailable("attempt storage offline"))
        }

        async fn prune_before(&self, _cutoff: DateTime<Utc>, _keep: usize) -> AppResult<u64> {
            Err(AppError::storage_unavailable("attempt storage offline"))
        }

        async fn purge_account(&self, _id: AccountId) -> AppResult<u64> {
            Err(AppError::storage_unavailable("attempt storage offline"))
        }
    }

    struct Fixture {
        guard: LoginGuard,
        ledger: Arc<AttemptLedger>,
        clock: ManualClock,
        account_id: AccountId,
    }

    const LOGIN: &str = "ada";
    const SECRET: &str = "correct horse";

    async fn fixture_with(store: Arc<dyn AttemptStore>, locks: bool) -> Fixture {
        let clock = ManualClock::default();
        let accounts = Arc::new(MemoryAccountStore::new());
        let account = accounts
            .create(
                CreateAccount {
                    name: "Ada Lovelace".to_string(),
                    email: "ada@example.com".to_string(),
                    login: LOGIN.to_string(),
                    password_hash: SECRET.to_string(),
                    dob: NaiveDate::from_ymd_opt(1815, 12, 10).unwrap(),
                },
                clock.now(),
            )
            .await
            .unwrap();

        let ledger = Arc::new(AttemptLedger::new(store, Arc::new(clock.clone())));
        let mut guard = LoginGuard::new(
            accounts,
            Arc::clone(&ledger),
            Arc::new(PlainVerifier),
            LockoutPolicy::default(),
        );
        if locks {
            guard = guard.with_account_locks(Arc::new(AccountLocks::new()));
        }

        Fixture {
            guard,
            ledger,
            clock,
            account_id: account.id,
        }
    }

    async fn fixture() -> Fixture {
        fixture_with(Arc::new(MemoryAttemptStore::new()), true).await
    }

    impl Fixture {
        async fn history(&self) -> Vec<AttemptRecord> {
            self.ledger.recent_attempts(self.account_id, 100).await.unwrap()
        }

        async fn seed(&self, outcome: AttemptOutcome) {
            self.ledger
                .record_attempt(self.account_id, outcome)
                .await
                .unwrap();
        }
    }

    fn locked(remaining_seconds: u64) -> AuthResult {
        AuthResult::Denied(DenyReason::LockedOut { remaining_seconds })
    }

    const INVALID: AuthResult = AuthResult::Denied(DenyReason::InvalidCredential);

    #[tokio::test]
    async fn test_correct_credential_is_allowed_and_recorded() {
        let f = fixture().await;

        let result = f.guard.authenticate(LOGIN, SECRET).await.unwrap();
        match result {
            AuthResult::Allowed(subject) => {
                assert_eq!(subject.account_id, f.account_id);
                assert_eq!(subject.login, LOGIN);
            }
            other => panic!("expected Allowed, got {other:?}"),
        }

        let history = f.history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].outcome, AttemptOutcome::Success);
    }

    #[tokio::test]
    async fn test_third_failure_locks_on_that_call() {
        let f = fixture().await;

        assert_eq!(f.guard.authenticate(LOGIN, "nope").await.unwrap(), INVALID);
        f.clock.advance_secs(1);
        assert_eq!(f.guard.authenticate(LOGIN, "nope").await.unwrap(), INVALID);
        f.clock.advance_secs(1);
        assert_eq!(f.guard.authenticate(LOGIN, "nope").await.unwrap(), locked(60));

        assert_eq!(f.history().await.len(), 3);
    }

    #[tokio::test]
    async fn test_locked_account_refuses_correct_credential_without_recording() {
        let f = fixture().await;
        for _ in 0..3 {
            f.seed(AttemptOutcome::Failure).await;
            f.clock.advance_secs(1);
        }
        // Newest failure at t0+2s; now t0+32s.
        f.clock.advance_secs(29);

        let before = f.history().await;
        assert_eq!(f.guard.authenticate(LOGIN, SECRET).await.unwrap(), locked(30));
        assert_eq!(f.history().await, before);
    }

    #[tokio::test]
    async fn test_lockout_expires_at_window_boundary() {
        let f = fixture().await;
        for _ in 0..3 {
            f.seed(AttemptOutcome::Failure).await;
        }

        f.clock.advance_secs(59);
        assert_eq!(f.guard.authenticate(LOGIN, SECRET).await.unwrap(), locked(1));

        f.clock.advance_secs(1);
        assert!(f.guard.authenticate(LOGIN, SECRET).await.unwrap().is_allowed());
    }

    #[tokio::test]
    async fn test_wrong_credential_after_expiry_relocks() {
        let f = fixture().await;
        for _ in 0..3 {
            f.seed(AttemptOutcome::Failure).await;
        }
        f.clock.advance_secs(60);

        // The three most recent are still all failures once this one lands.
        assert_eq!(f.guard.authenticate(LOGIN, "nope").await.unwrap(), locked(60));
        assert_eq!(f.history().await.len(), 4);
    }

    #[tokio::test]
    async fn test_two_failures_then_correct_is_allowed() {
        let f = fixture().await;
        f.seed(AttemptOutcome::Failure).await;
        f.seed(AttemptOutcome::Failure).await;

        assert!(f.guard.authenticate(LOGIN, SECRET).await.unwrap().is_allowed());
        let history = f.history().await;
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].outcome, AttemptOutcome::Success);
    }

    #[tokio::test]
    async fn test_success_resets_failure_run() {
        let f = fixture().await;
        f.seed(AttemptOutcome::Failure).await;
        f.seed(AttemptOutcome::Failure).await;
        f.seed(AttemptOutcome::Success).await;

        assert_eq!(f.guard.authenticate(LOGIN, "nope").await.unwrap(), INVALID);
        assert_eq!(f.guard.authenticate(LOGIN, "nope").await.unwrap(), INVALID);
        assert_eq!(f.guard.authenticate(LOGIN, "nope").await.unwrap(), locked(60));
    }

    #[tokio::test]
    async fn test_unknown_login_is_invalid_and_unrecorded() {
        let f = fixture().await;
        assert_eq!(f.guard.authenticate("nobody", SECRET).await.unwrap(), INVALID);
        assert!(f.history().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_login_spends_a_decoy_comparison() {
        let verifier = Arc::new(DecoyCounter::default());
        let ledger = Arc::new(AttemptLedger::new(
            Arc::new(MemoryAttemptStore::new()),
            Arc::new(ManualClock::default()),
        ));
        let guard = LoginGuard::new(
            Arc::new(MemoryAccountStore::new()),
            ledger,
            Arc::clone(&verifier) as Arc<dyn CredentialVerifier>,
            LockoutPolicy::default(),
        );

        assert_eq!(guard.authenticate("nobody", SECRET).await.unwrap(), INVALID);
        assert_eq!(
            verifier.decoys.load(std::sync::atomic::Ordering::SeqCst),
            1
        );
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let f = fixture_with(Arc::new(UnreachableStore), false).await;
        let err = f.guard.authenticate(LOGIN, SECRET).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::StorageUnavailable);
    }

    #[tokio::test]
    async fn test_lockout_state_tracks_time() {
        let f = fixture().await;
        for _ in 0..3 {
            f.seed(AttemptOutcome::Failure).await;
        }
        f.clock.advance(Duration::seconds(45));
        assert_eq!(
            f.guard.lockout_state(f.account_id).await.unwrap(),
            LockoutState::Locked { remaining_seconds: 15 }
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_wrong_attempts_are_serialized() {
        let f = fixture().await;
        let guard = Arc::new(f.guard.clone());

        let mut handles = Vec::new();
        for _ in 0..8 {
            let guard = Arc::clone(&guard);
            handles.push(tokio::spawn(async move {
                guard.authenticate(LOGIN, "nope").await.unwrap()
            }));
        }

        let mut invalid = 0;
        let mut locked_out = 0;
        for handle in handles {
            match handle.await.unwrap() {
                AuthResult::Denied(DenyReason::InvalidCredential) => invalid += 1,
                AuthResult::Denied(DenyReason::LockedOut { .. }) => locked_out += 1,
                AuthResult::Allowed(_) => panic!("wrong credential allowed"),
            }
        }

        // Serialized: two plain failures, then the third trips the lock
        // and every later call is refused without recording.
        assert_eq!(invalid, 2);
        assert_eq!(locked_out, 6);
        assert_eq!(f.history().await.len(), 3);
    }
}
