//! Types for code engine results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::OtpError;

/// Whether a successful verification removes the code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerifyMode {
    /// Accept and remove the code (final step of a flow)
    Consume,
    /// Accept and keep the code (intermediate check)
    Peek,
}

/// Why a verification was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// No live code, the code expired, or the candidate did not match.
    /// Callers cannot tell these apart.
    InvalidOrExpired,
}

/// Result of verifying a candidate code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerifyOutcome {
    Accepted,
    Rejected { reason: RejectReason },
    LockedOut { retry_after_seconds: i64 },
}

impl VerifyOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, VerifyOutcome::Accepted)
    }

    /// Maps non-accepted outcomes to the flow error
    pub fn into_result(self) -> Result<(), OtpError> {
        match self {
            VerifyOutcome::Accepted => Ok(()),
            VerifyOutcome::Rejected {
                reason: RejectReason::InvalidOrExpired,
            } => Err(OtpError::InvalidOrExpired),
            VerifyOutcome::LockedOut {
                retry_after_seconds,
            } => Err(OtpError::LockedOut {
                retry_after_seconds,
            }),
        }
    }
}

/// Proof that a resend window was opened for one identity.
///
/// Handed out by `OtpService::try_mark_resend` and spent by
/// `OtpService::issue_with_permit`, which then skips the cooldown check for
/// the window this permit opened.
#[derive(Debug, PartialEq, Eq)]
pub struct ResendPermit {
    pub(crate) identity: String,
    pub(crate) next_resend_at: DateTime<Utc>,
}

impl ResendPermit {
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// End of the cooldown this permit started
    pub fn next_resend_at(&self) -> DateTime<Utc> {
        self.next_resend_at
    }
}

/// Result of asking to mark a resend
#[derive(Debug, PartialEq, Eq)]
pub enum ResendDecision {
    /// Cooldown started, a new code may be issued with the permit
    Allowed { permit: ResendPermit },
    /// Still cooling down; nothing was changed
    Throttled { retry_after_seconds: i64 },
}

impl ResendDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ResendDecision::Allowed { .. })
    }
}

/// A freshly issued code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    /// Plaintext code, to be delivered and then dropped
    pub code: String,
    /// When the code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// When the identity may request another code
    pub next_resend_at: DateTime<Utc>,
    /// Codes issued to this identity so far, including this one
    pub issued_count: u32,
}
