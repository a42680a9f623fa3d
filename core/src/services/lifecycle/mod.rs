//! Password reset and email verification flows
//!
//! Each flow issues a code through the OTP engine, delivers it by email and,
//! once the user proves possession of the code, applies the change through
//! the user directory.

mod config;
mod service;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::LifecycleConfig;
pub use service::OtpLifecycleService;
pub use traits::{EmailServiceTrait, UserDirectoryTrait};
pub use types::ActionOutcome;
