//! In-memory one-time code engine
//!
//! This module keeps per-identity code state and enforces the policies
//! around it:
//! - Code issuance with a fixed lifetime, one live code per identity
//! - Resend throttling between issuances
//! - Temporary lockout after repeated failed verifications
//! - Bounded memory through periodic sweeping and capacity eviction

mod clock;
mod config;
mod generator;
mod service;
mod sweeper;
mod types;

#[cfg(test)]
mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::OtpServiceConfig;
pub use generator::CodeGenerator;
pub use service::OtpService;
pub use sweeper::{OtpSweeper, SweepResult};
pub use types::{
    IssuedCode, RejectReason, ResendDecision, ResendPermit, VerifyMode, VerifyOutcome,
};
