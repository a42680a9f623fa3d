//! Per-identity code store and policy enforcement

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rr_shared::utils::mask_email;

use crate::domain::entities::{retry_after_seconds, AttemptCounter, OtpRecord, ResendCounter};
use crate::errors::{DomainResult, OtpError};

use super::clock::{Clock, SystemClock};
use super::config::OtpServiceConfig;
use super::generator::CodeGenerator;
use super::types::{
    IssuedCode, RejectReason, ResendDecision, ResendPermit, VerifyMode, VerifyOutcome,
};

/// Everything tracked for one identity
#[derive(Debug, Clone)]
struct IdentityEntry {
    record: Option<OtpRecord>,
    attempts: AttemptCounter,
    resend: ResendCounter,
    last_touched: DateTime<Utc>,
}

impl IdentityEntry {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            record: None,
            attempts: AttemptCounter::default(),
            resend: ResendCounter::default(),
            last_touched: now,
        }
    }

    /// No live code, no active lock and no active cooldown
    fn is_idle(&self, now: DateTime<Utc>) -> bool {
        let has_live_code = self
            .record
            .as_ref()
            .is_some_and(|record| !record.is_expired(now));
        !has_live_code && !self.attempts.is_locked(now) && !self.resend.is_blocked(now)
    }
}

/// In-memory one-time code engine.
///
/// All state lives behind a single mutex, so `issue` and `verify` are each
/// atomic with respect to concurrent calls for the same identity. The lock
/// is never held across an await point.
pub struct OtpService {
    config: OtpServiceConfig,
    clock: Arc<dyn Clock>,
    generator: CodeGenerator,
    entries: Mutex<HashMap<String, IdentityEntry>>,
}

impl OtpService {
    /// Create an engine driven by the system clock
    pub fn new(config: OtpServiceConfig) -> DomainResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Create an engine with an injected time source
    ///
    /// # Arguments
    ///
    /// * `config` - Policy configuration, validated here
    /// * `clock` - Time source used for every expiry, cooldown and lock check
    pub fn with_clock(config: OtpServiceConfig, clock: Arc<dyn Clock>) -> DomainResult<Self> {
        config.validate()?;
        let generator = CodeGenerator::new(config.code_length, config.allow_leading_zero);

        Ok(Self {
            config,
            clock,
            generator,
            entries: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Starts the resend cooldown if it is not already running.
    ///
    /// On `Allowed` the returned permit must be passed to
    /// `issue_with_permit` to store the code for the window it opened. A
    /// throttled call changes nothing.
    pub fn try_mark_resend(&self, identity: &str) -> ResendDecision {
        let now = self.clock.now();
        let mut entries = self.lock_entries();
        let entry = match self.entry_for(&mut entries, identity, now) {
            Ok(entry) => entry,
            Err(error) => {
                return ResendDecision::Throttled {
                    retry_after_seconds: error.retry_after_seconds().unwrap_or(1),
                }
            }
        };

        if let Some(remaining) = entry.resend.block_remaining(now) {
            return ResendDecision::Throttled {
                retry_after_seconds: retry_after_seconds(remaining),
            };
        }

        entry.last_touched = now;
        let next_resend_at = entry.resend.mark_issued(now, self.config.resend_cooldown);
        ResendDecision::Allowed {
            permit: ResendPermit {
                identity: identity.to_string(),
                next_resend_at,
            },
        }
    }

    /// Issues a fresh code for `identity`.
    ///
    /// Under one critical section this checks the cooldown, starts a new
    /// one, clears the failure counter and replaces any previous code. A
    /// throttled request leaves every piece of state untouched.
    pub fn issue(&self, identity: &str) -> Result<IssuedCode, OtpError> {
        self.issue_inner(identity, None)
    }

    /// Issues a code inside the window opened by `try_mark_resend`.
    ///
    /// The cooldown is not checked again when it is still the one the permit
    /// opened. If the window was replaced or dropped in between, this
    /// behaves like `issue`.
    pub fn issue_with_permit(&self, permit: ResendPermit) -> Result<IssuedCode, OtpError> {
        self.issue_inner(&permit.identity, Some(permit.next_resend_at))
    }

    fn issue_inner(
        &self,
        identity: &str,
        permitted_window: Option<DateTime<Utc>>,
    ) -> Result<IssuedCode, OtpError> {
        let now = self.clock.now();
        let code = self.generator.generate();

        let mut entries = self.lock_entries();
        let entry = match self.entry_for(&mut entries, identity, now) {
            Ok(entry) => entry,
            Err(error) => {
                tracing::warn!(
                    identity = %mask_email(identity),
                    event = "otp_store_full",
                    "Code request rejected, every tracked identity is locked"
                );
                return Err(error);
            }
        };

        let next_resend_at = match permitted_window {
            Some(window) if entry.resend.blocked_until == Some(window) && window > now => window,
            _ => {
                if let Some(remaining) = entry.resend.block_remaining(now) {
                    let retry_after_seconds = retry_after_seconds(remaining);
                    drop(entries);
                    tracing::warn!(
                        identity = %mask_email(identity),
                        retry_after_seconds = retry_after_seconds,
                        event = "otp_resend_throttled",
                        "Code request rejected during resend cooldown"
                    );
                    return Err(OtpError::Throttled {
                        retry_after_seconds,
                    });
                }
                entry.resend.mark_issued(now, self.config.resend_cooldown)
            }
        };

        entry.attempts.reset();
        let record = OtpRecord::new(&code, now, self.config.ttl);
        let expires_at = record.expires_at;
        entry.record = Some(record);
        entry.last_touched = now;
        let issued_count = entry.resend.issued_count;
        drop(entries);

        tracing::info!(
            identity = %mask_email(identity),
            issued_count = issued_count,
            expires_at = %expires_at,
            event = "otp_issued",
            "Issued new one-time code"
        );

        Ok(IssuedCode {
            code,
            expires_at,
            next_resend_at,
            issued_count,
        })
    }

    /// Checks `candidate` against the live code for `identity`.
    ///
    /// While locked, nothing is inspected or changed. A missing, expired or
    /// mismatched code counts as one failure; an expired code is removed. A
    /// match clears the failure counter and, in `Consume` mode, removes the
    /// code.
    pub fn verify(&self, identity: &str, candidate: &str, mode: VerifyMode) -> VerifyOutcome {
        let now = self.clock.now();
        let mut entries = self.lock_entries();
        let entry = match self.entry_for(&mut entries, identity, now) {
            Ok(entry) => entry,
            // Not tracked and no room to track it, so there is no code to match
            Err(_) => {
                tracing::warn!(
                    identity = %mask_email(identity),
                    event = "otp_store_full",
                    "Verification for untracked identity while every entry is locked"
                );
                return VerifyOutcome::Rejected {
                    reason: RejectReason::InvalidOrExpired,
                };
            }
        };

        if let Some(remaining) = entry.attempts.lock_remaining(now) {
            let retry_after_seconds = retry_after_seconds(remaining);
            drop(entries);
            tracing::warn!(
                identity = %mask_email(identity),
                retry_after_seconds = retry_after_seconds,
                event = "otp_verify_locked",
                "Verification refused while locked out"
            );
            return VerifyOutcome::LockedOut {
                retry_after_seconds,
            };
        }

        entry.last_touched = now;

        if entry
            .record
            .as_ref()
            .is_some_and(|record| record.is_expired(now))
        {
            entry.record = None;
        }

        let matched = entry
            .record
            .as_ref()
            .is_some_and(|record| record.matches(candidate));

        if matched {
            entry.attempts.reset();
            if mode == VerifyMode::Consume {
                entry.record = None;
            }
            drop(entries);
            tracing::info!(
                identity = %mask_email(identity),
                mode = ?mode,
                event = "otp_verified",
                "One-time code accepted"
            );
            return VerifyOutcome::Accepted;
        }

        let locked = entry.attempts.record_failure(
            now,
            self.config.lockout_threshold,
            self.config.lockout_duration,
        );
        let fail_count = entry.attempts.fail_count;
        drop(entries);

        if locked {
            tracing::warn!(
                identity = %mask_email(identity),
                lockout_seconds = self.config.lockout_duration.num_seconds(),
                event = "otp_lockout_engaged",
                "Too many failed verifications, identity locked"
            );
        } else {
            tracing::debug!(
                identity = %mask_email(identity),
                fail_count = fail_count,
                event = "otp_verify_failed",
                "One-time code rejected"
            );
        }

        VerifyOutcome::Rejected {
            reason: RejectReason::InvalidOrExpired,
        }
    }

    /// Verify without removing the code
    pub fn peek_verify(&self, identity: &str, candidate: &str) -> VerifyOutcome {
        self.verify(identity, candidate, VerifyMode::Peek)
    }

    /// Verify and remove the code on success
    pub fn verify_and_consume(&self, identity: &str, candidate: &str) -> VerifyOutcome {
        self.verify(identity, candidate, VerifyMode::Consume)
    }

    /// Whether `identity` currently holds an unexpired code
    pub fn code_exists(&self, identity: &str) -> bool {
        let now = self.clock.now();
        self.lock_entries()
            .get(identity)
            .and_then(|entry| entry.record.as_ref())
            .is_some_and(|record| !record.is_expired(now))
    }

    /// Drops every idle entry and returns how many were removed.
    ///
    /// Dropping an idle entry also forgets its issuance count and any
    /// failures short of a lock.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let mut entries = self.lock_entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_idle(now));
        before - entries.len()
    }

    /// Number of tracked identities
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock_entries(&self) -> MutexGuard<'_, HashMap<String, IdentityEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Looks up or creates the entry for `identity`, making room first when
    /// the store is full.
    ///
    /// Fails with `AtCapacity` when every tracked identity is locked out.
    fn entry_for<'a>(
        &self,
        entries: &'a mut HashMap<String, IdentityEntry>,
        identity: &str,
        now: DateTime<Utc>,
    ) -> Result<&'a mut IdentityEntry, OtpError> {
        if !entries.contains_key(identity) && entries.len() >= self.config.max_entries {
            Self::make_room(entries, now, self.config.max_entries)?;
        }
        Ok(entries
            .entry(identity.to_string())
            .or_insert_with(|| IdentityEntry::new(now)))
    }

    /// Sweeps idle entries, then evicts until a new entry fits.
    ///
    /// Locked identities are never evicted; dropping one would clear its
    /// lock. Among the rest, entries still cooling down go last, oldest
    /// first.
    fn make_room(
        entries: &mut HashMap<String, IdentityEntry>,
        now: DateTime<Utc>,
        capacity: usize,
    ) -> Result<(), OtpError> {
        entries.retain(|_, entry| !entry.is_idle(now));

        while entries.len() >= capacity {
            let victim = entries
                .iter()
                .filter(|(_, entry)| !entry.attempts.is_locked(now))
                .min_by_key(|(_, entry)| (entry.resend.is_blocked(now), entry.last_touched))
                .map(|(key, _)| key.clone());

            let Some(key) = victim else {
                let soonest_unlock = entries
                    .values()
                    .filter_map(|entry| entry.attempts.lock_remaining(now))
                    .min()
                    .unwrap_or_else(|| chrono::Duration::seconds(1));
                return Err(OtpError::AtCapacity {
                    retry_after_seconds: retry_after_seconds(soonest_unlock),
                });
            };

            entries.remove(&key);
            tracing::warn!(
                identity = %mask_email(&key),
                event = "otp_entry_evicted",
                "Evicted least recently used entry at capacity"
            );
        }
        Ok(())
    }
}
