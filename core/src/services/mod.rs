//! Business services containing domain logic and use cases.

pub mod lifecycle;
pub mod otp;

// Re-export commonly used types
pub use lifecycle::{
    ActionOutcome, EmailServiceTrait, LifecycleConfig, OtpLifecycleService, UserDirectoryTrait,
};
pub use otp::{
    Clock, IssuedCode, ManualClock, OtpService, OtpServiceConfig, OtpSweeper, RejectReason,
    ResendDecision, ResendPermit, SweepResult, SystemClock, VerifyMode, VerifyOutcome,
};
