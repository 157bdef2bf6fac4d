//! Sliding-window lockout rule.

use chrono::{DateTime, Utc};

use gatekeep_core::config::AuthConfig;
use gatekeep_entity::attempt::AttemptRecord;

/// Lockout status derived from an account's most recent attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockoutState {
    /// Authentication may proceed.
    Clear,
    /// The account is locked for this many more whole seconds.
    Locked {
        /// Seconds until the window closes, always at least 1.
        remaining_seconds: u64,
    },
}

impl LockoutState {
    /// Whether this state denies authentication.
    pub fn is_locked(&self) -> bool {
        matches!(self, Self::Locked { .. })
    }
}

/// The N-failures-within-W-seconds lockout rule.
///
/// An account is locked when its `threshold` most recent attempts are all
/// failures and the newest of them is less than `window_seconds` old.
/// Nothing is stored: the state is recomputed from history on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockoutPolicy {
    threshold: usize,
    window_seconds: u64,
}

impl LockoutPolicy {
    /// Creates a policy. Zero values are raised to one.
    pub fn new(threshold: usize, window_seconds: u64) -> Self {
        Self {
            threshold: threshold.max(1),
            window_seconds: window_seconds.max(1),
        }
    }

    /// Builds the policy from auth configuration.
    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.lockout_threshold, config.lockout_window_seconds)
    }

    /// Consecutive failures that trigger a lockout.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Length of the lockout window in seconds.
    pub fn window_seconds(&self) -> u64 {
        self.window_seconds
    }

    /// Evaluates the rule over `recent`, which must be newest first.
    ///
    /// Only the first `threshold` records are considered. Elapsed time is
    /// floored to whole seconds; a newest record stamped after `now` counts
    /// as zero seconds old.
    pub fn evaluate(&self, recent: &[AttemptRecord], now: DateTime<Utc>) -> LockoutState {
        if recent.len() < self.threshold {
            return LockoutState::Clear;
        }

        let window = &recent[..self.threshold];
        if !window.iter().all(AttemptRecord::is_failure) {
            return LockoutState::Clear;
        }

        let elapsed = (now - window[0].attempted_at).num_seconds().max(0) as u64;
        if elapsed < self.window_seconds {
            LockoutState::Locked {
                remaining_seconds: self.window_seconds - elapsed,
            }
        } else {
            LockoutState::Clear
        }
    }
}

impl Default for LockoutPolicy {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}
