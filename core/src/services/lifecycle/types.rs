//! Types for lifecycle flow results

use serde::{Deserialize, Serialize};

use crate::errors::{OtpError, OtpErrorCode};

/// Uniform result of every lifecycle operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,

    /// User-facing confirmation on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// User-facing error on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Machine-readable failure category
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<OtpErrorCode>,

    /// Seconds to wait before retrying, for throttle and lockout failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after_seconds: Option<i64>,
}

impl ActionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            error_code: None,
            retry_after_seconds: None,
        }
    }

    pub fn failure(error: &OtpError) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.to_string()),
            error_code: Some(error.code()),
            retry_after_seconds: error.retry_after_seconds(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl From<Result<String, OtpError>> for ActionOutcome {
    fn from(result: Result<String, OtpError>) -> Self {
        match result {
            Ok(message) => Self::ok(message),
            Err(error) => Self::failure(&error),
        }
    }
}
