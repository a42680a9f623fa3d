//! Domain-specific error types and error handling.

mod types;


// Re-export all error types
pub use types::{OtpError, OtpErrorCode};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Otp(#[from] OtpError),
}

pub type DomainResult<T> = Result<T, DomainError>;
