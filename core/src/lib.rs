//! # RoomRent Core
//!
//! Core business logic for the RoomRent backend: the in-memory one-time code
//! engine (issuance, resend throttling, attempt lockout) and the password
//! reset and email verification flows built on top of it.

pub mod domain;
pub mod errors;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use services::*;
