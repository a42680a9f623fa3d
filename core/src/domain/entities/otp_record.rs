//! Per-identity one-time code state: the live code, the failure counter and
//! the resend counter.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A live one-time code for one identity.
///
/// Only the SHA-256 digest of the code is kept, so the plaintext exists
/// solely in the email that carried it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpRecord {
    /// Hex-encoded SHA-256 digest of the code
    pub code_hash: String,

    /// Timestamp when the code was issued
    pub issued_at: DateTime<Utc>,

    /// Timestamp when the code stops being accepted
    pub expires_at: DateTime<Utc>,
}

impl OtpRecord {
    /// Creates a record for `code` issued at `issued_at` and valid for `ttl`
    pub fn new(code: &str, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code_hash: Self::hash_code(code),
            issued_at,
            expires_at: issued_at + ttl,
        }
    }

    /// Digest used for storage and comparison
    pub fn hash_code(code: &str) -> String {
        hex::encode(Sha256::digest(code.as_bytes()))
    }

    /// A record is expired from `expires_at` onwards
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Constant-time comparison of a candidate code against the stored digest
    pub fn matches(&self, candidate: &str) -> bool {
        let candidate_hash = Self::hash_code(candidate);
        constant_time_eq(candidate_hash.as_bytes(), self.code_hash.as_bytes())
    }
}

/// Consecutive failed verifications and the lock they may trigger
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptCounter {
    /// Failures since the last success, issuance or lock
    pub fail_count: u32,

    /// Verification is refused until this instant
    pub locked_until: Option<DateTime<Utc>>,
}

impl AttemptCounter {
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.lock_remaining(now).is_some()
    }

    /// Time left on an active lock, `None` when not locked
    pub fn lock_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.locked_until
            .filter(|until| *until > now)
            .map(|until| until - now)
    }

    /// Records one failure.
    ///
    /// Reaching `threshold` engages a lock of `lockout` and resets the
    /// failure count, so the identity gets a fresh set of attempts once the
    /// lock elapses. Returns `true` when this failure engaged the lock.
    pub fn record_failure(&mut self, now: DateTime<Utc>, threshold: u32, lockout: Duration) -> bool {
        self.fail_count += 1;
        if self.fail_count >= threshold {
            self.fail_count = 0;
            self.locked_until = Some(now + lockout);
            return true;
        }
        false
    }

    /// Clears failures and any lock
    pub fn reset(&mut self) {
        self.fail_count = 0;
        self.locked_until = None;
    }
}

/// Issuance history used for resend throttling
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendCounter {
    /// Total codes issued to this identity while it was tracked
    pub issued_count: u32,

    /// No new code may be issued before this instant
    pub blocked_until: Option<DateTime<Utc>>,
}

impl ResendCounter {
    pub fn is_blocked(&self, now: DateTime<Utc>) -> bool {
        self.block_remaining(now).is_some()
    }

    /// Time left on the cooldown, `None` when a new code may be issued
    pub fn block_remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.blocked_until
            .filter(|until| *until > now)
            .map(|until| until - now)
    }

    /// Counts an issuance and starts the cooldown
    pub fn mark_issued(&mut self, now: DateTime<Utc>, cooldown: Duration) -> DateTime<Utc> {
        self.issued_count = self.issued_count.saturating_add(1);
        let next = now + cooldown;
        self.blocked_until = Some(next);
        next
    }
}

/// Rounds a remaining duration up to whole seconds, never below one
pub fn retry_after_seconds(remaining: Duration) -> i64 {
    let millis = remaining.num_milliseconds();
    ((millis + 999) / 1000).max(1)
}
