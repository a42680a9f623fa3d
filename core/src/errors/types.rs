//! One-time code flow errors
//!
//! The `Display` text of each variant is safe to show to end users. Provider
//! and directory details are carried in `reason` for logs only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable error code returned to clients
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpErrorCode {
    Throttled,
    LockedOut,
    InvalidOrExpired,
    DeliveryFailed,
    DirectoryFailed,
    UserNotFound,
    ValidationFailed,
    AtCapacity,
}

impl OtpErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpErrorCode::Throttled => "THROTTLED",
            OtpErrorCode::LockedOut => "LOCKED_OUT",
            OtpErrorCode::InvalidOrExpired => "INVALID_OR_EXPIRED",
            OtpErrorCode::DeliveryFailed => "DELIVERY_FAILED",
            OtpErrorCode::DirectoryFailed => "DIRECTORY_FAILED",
            OtpErrorCode::UserNotFound => "USER_NOT_FOUND",
            OtpErrorCode::ValidationFailed => "VALIDATION_FAILED",
            OtpErrorCode::AtCapacity => "AT_CAPACITY",
        }
    }
}

/// Failures of the password reset and email verification flows
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    #[error("Please wait {retry_after_seconds} seconds before requesting a new code")]
    Throttled { retry_after_seconds: i64 },

    #[error("Too many failed attempts. Please try again in {retry_after_seconds} seconds")]
    LockedOut { retry_after_seconds: i64 },

    #[error("Invalid or expired verification code")]
    InvalidOrExpired,

    #[error("Failed to send verification email. Please try again later")]
    Delivery { reason: String },

    #[error("Unable to complete the request. Please try again later")]
    Directory { reason: String },

    #[error("No account found for this email address")]
    UserNotFound,

    #[error("{message}")]
    Validation { message: String },

    /// Every tracked identity is locked out, so no new one can be admitted
    #[error("The service is busy. Please try again in {retry_after_seconds} seconds")]
    AtCapacity { retry_after_seconds: i64 },
}

impl OtpError {
    pub fn validation(message: impl Into<String>) -> Self {
        OtpError::Validation {
            message: message.into(),
        }
    }

    pub fn code(&self) -> OtpErrorCode {
        match self {
            OtpError::Throttled { .. } => OtpErrorCode::Throttled,
            OtpError::LockedOut { .. } => OtpErrorCode::LockedOut,
            OtpError::InvalidOrExpired => OtpErrorCode::InvalidOrExpired,
            OtpError::Delivery { .. } => OtpErrorCode::DeliveryFailed,
            OtpError::Directory { .. } => OtpErrorCode::DirectoryFailed,
            OtpError::UserNotFound => OtpErrorCode::UserNotFound,
            OtpError::Validation { .. } => OtpErrorCode::ValidationFailed,
            OtpError::AtCapacity { .. } => OtpErrorCode::AtCapacity,
        }
    }

    /// Seconds the caller should wait, for throttle, lockout and capacity errors
    pub fn retry_after_seconds(&self) -> Option<i64> {
        match self {
            OtpError::Throttled { retry_after_seconds }
            | OtpError::LockedOut { retry_after_seconds }
            | OtpError::AtCapacity { retry_after_seconds } => Some(*retry_after_seconds),
            _ => None,
        }
    }

    /// Failures caused by an external collaborator rather than the caller
    pub fn is_upstream(&self) -> bool {
        matches!(self, OtpError::Delivery { .. } | OtpError::Directory { .. })
    }
}
