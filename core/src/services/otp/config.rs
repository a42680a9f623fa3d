//! Configuration for the one-time code engine

use chrono::Duration;
use rr_shared::config::OtpSettings;

use crate::errors::{DomainError, DomainResult};

/// Shortest and longest supported code lengths
pub const MIN_CODE_LENGTH: usize = 4;
pub const MAX_CODE_LENGTH: usize = 12;

/// Policy durations above this are clamped (ten years)
const MAX_POLICY_SECONDS: u64 = 315_360_000;

/// Configuration for the one-time code engine
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Lifetime of an issued code
    pub ttl: Duration,
    /// Minimum time between issuances for one identity
    pub resend_cooldown: Duration,
    /// Consecutive failures that trigger a lockout
    pub lockout_threshold: u32,
    /// How long a lockout lasts
    pub lockout_duration: Duration,
    /// Number of digits per code
    pub code_length: usize,
    /// Whether codes may start with `0`
    pub allow_leading_zero: bool,
    /// Maximum number of tracked identities
    pub max_entries: usize,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from(&OtpSettings::default())
    }
}

impl From<&OtpSettings> for OtpServiceConfig {
    fn from(settings: &OtpSettings) -> Self {
        Self {
            ttl: seconds(settings.ttl_seconds),
            resend_cooldown: seconds(settings.resend_cooldown_seconds),
            lockout_threshold: settings.lockout_threshold,
            lockout_duration: seconds(settings.lockout_duration_seconds),
            code_length: settings.code_length,
            allow_leading_zero: settings.allow_leading_zero,
            max_entries: settings.max_entries,
        }
    }
}

impl OtpServiceConfig {
    /// Rejects settings the engine cannot honor
    pub fn validate(&self) -> DomainResult<()> {
        if self.ttl <= Duration::zero() {
            return Err(invalid("OTP ttl must be positive"));
        }
        if self.resend_cooldown < Duration::zero() || self.lockout_duration < Duration::zero() {
            return Err(invalid("OTP cooldown and lockout durations cannot be negative"));
        }
        if self.lockout_threshold == 0 {
            return Err(invalid("OTP lockout threshold must be at least 1"));
        }
        if !(MIN_CODE_LENGTH..=MAX_CODE_LENGTH).contains(&self.code_length) {
            return Err(invalid(&format!(
                "OTP code length must be between {} and {}",
                MIN_CODE_LENGTH, MAX_CODE_LENGTH
            )));
        }
        if self.max_entries == 0 {
            return Err(invalid("OTP max_entries must be at least 1"));
        }
        Ok(())
    }

    /// Code lifetime in whole minutes, rounded up
    pub fn ttl_minutes(&self) -> u64 {
        let secs = self.ttl.num_seconds().max(0) as u64;
        secs.div_ceil(60)
    }
}

fn seconds(value: u64) -> Duration {
    Duration::seconds(value.min(MAX_POLICY_SECONDS) as i64)
}

fn invalid(message: &str) -> DomainError {
    DomainError::Validation {
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_settings() {
        let config = OtpServiceConfig::default();
        assert_eq!(config.ttl, Duration::minutes(10));
        assert_eq!(config.resend_cooldown, Duration::minutes(3));
        assert_eq!(config.lockout_threshold, 3);
        assert_eq!(config.lockout_duration, Duration::minutes(2));
        assert_eq!(config.ttl_minutes(), 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_ttl = OtpServiceConfig {
            ttl: Duration::zero(),
            ..Default::default()
        };
        assert!(zero_ttl.validate().is_err());

        let no_threshold = OtpServiceConfig {
            lockout_threshold: 0,
            ..Default::default()
        };
        assert!(no_threshold.validate().is_err());

        let long_code = OtpServiceConfig {
            code_length: 13,
            ..Default::default()
        };
        assert!(long_code.validate().is_err());
    }

    #[test]
    fn test_huge_durations_are_clamped() {
        let settings = OtpSettings {
            ttl_seconds: u64::MAX,
            ..Default::default()
        };
        let config = OtpServiceConfig::from(&settings);
        assert_eq!(config.ttl, Duration::seconds(MAX_POLICY_SECONDS as i64));
    }
}
