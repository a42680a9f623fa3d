//! One-time code policy configuration

use serde::{Deserialize, Serialize};

/// OTP issuance, throttling and lockout settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpSettings {
    /// Lifetime of an issued code in seconds
    #[serde(default = "default_ttl_seconds")]
    pub ttl_seconds: u64,

    /// Minimum seconds between two issuances for the same email
    #[serde(default = "default_resend_cooldown_seconds")]
    pub resend_cooldown_seconds: u64,

    /// Consecutive failed verifications that trigger a lockout
    #[serde(default = "default_lockout_threshold")]
    pub lockout_threshold: u32,

    /// Lockout duration in seconds
    #[serde(default = "default_lockout_duration_seconds")]
    pub lockout_duration_seconds: u64,

    /// Number of digits in a code
    #[serde(default = "default_code_length")]
    pub code_length: usize,

    /// Allow codes starting with `0` (full range instead of 100000-999999)
    #[serde(default)]
    pub allow_leading_zero: bool,

    /// Upper bound on tracked identities
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Background sweep period in seconds (0 disables the sweeper)
    #[serde(default = "default_sweep_interval_seconds")]
    pub sweep_interval_seconds: u64,

    /// Minimum accepted length for a new password
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Product name used in email subjects
    #[serde(default = "default_app_name")]
    pub app_name: String,
}

impl Default for OtpSettings {
    fn default() -> Self {
        Self {
            ttl_seconds: default_ttl_seconds(),
            resend_cooldown_seconds: default_resend_cooldown_seconds(),
            lockout_threshold: default_lockout_threshold(),
            lockout_duration_seconds: default_lockout_duration_seconds(),
            code_length: default_code_length(),
            allow_leading_zero: false,
            max_entries: default_max_entries(),
            sweep_interval_seconds: default_sweep_interval_seconds(),
            min_password_length: default_min_password_length(),
            app_name: default_app_name(),
        }
    }
}

impl OtpSettings {
    /// Code lifetime in whole minutes, for user-facing copy
    pub fn ttl_minutes(&self) -> u64 {
        self.ttl_seconds.div_ceil(60)
    }
}

fn default_ttl_seconds() -> u64 {
    600 // 10 minutes
}

fn default_resend_cooldown_seconds() -> u64 {
    180 // 3 minutes
}

fn default_lockout_threshold() -> u32 {
    3
}

fn default_lockout_duration_seconds() -> u64 {
    120 // 2 minutes
}

fn default_code_length() -> usize {
    6
}

fn default_max_entries() -> usize {
    10_000
}

fn default_sweep_interval_seconds() -> u64 {
    60
}

fn default_min_password_length() -> usize {
    8
}

fn default_app_name() -> String {
    String::from("RoomRent")
}
