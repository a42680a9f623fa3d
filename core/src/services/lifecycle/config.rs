//! Configuration for the OTP lifecycle flows

use rr_shared::config::OtpSettings;

/// Configuration for the OTP lifecycle flows
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Product name used in email subjects
    pub app_name: String,
    /// Minimum accepted length for a new password, in characters
    pub min_password_length: usize,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::from(&OtpSettings::default())
    }
}

impl From<&OtpSettings> for LifecycleConfig {
    fn from(settings: &OtpSettings) -> Self {
        Self {
            app_name: settings.app_name.clone(),
            min_password_length: settings.min_password_length,
        }
    }
}
