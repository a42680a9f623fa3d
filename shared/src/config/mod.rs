//! Configuration module with business-specific sub-modules
//!
//! - `directory` - User directory (Appwrite) connection
//! - `email` - Email provider (Resend) connection
//! - `environment` - Environment detection and logging configuration
//! - `otp` - One-time code lifetime, throttling and lockout policy
//! - `server` - HTTP server and CORS configuration

pub mod directory;
pub mod email;
pub mod environment;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use directory::DirectoryConfig;
pub use email::EmailConfig;
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use otp::OtpSettings;
pub use server::{CorsConfig, ServerConfig};

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// OTP policy configuration
    #[serde(default)]
    pub otp: OtpSettings,

    /// Email provider configuration
    #[serde(default)]
    pub email: EmailConfig,

    /// User directory configuration
    #[serde(default)]
    pub directory: DirectoryConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig::default(),
            otp: OtpSettings::default(),
            email: EmailConfig::default(),
            directory: DirectoryConfig::default(),
            cors: CorsConfig::development(),
            logging: LoggingConfig::for_environment(Environment::Development),
        }
    }

    /// Create configuration for production environment
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig::new("0.0.0.0", 8080),
            otp: OtpSettings::default(),
            email: EmailConfig {
                provider: String::from("resend"),
                ..Default::default()
            },
            directory: DirectoryConfig {
                provider: String::from("appwrite"),
                ..Default::default()
            },
            cors: CorsConfig::default(),
            logging: LoggingConfig::for_environment(Environment::Production),
        }
    }

    /// Baseline configuration for an environment
    pub fn for_environment(env: Environment) -> Self {
        match env {
            Environment::Development => Self::development(),
            Environment::Production => Self::production(),
            Environment::Staging => {
                let mut config = Self::production();
                config.environment = Environment::Staging;
                config.logging = LoggingConfig::for_environment(Environment::Staging);
                config
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_baselines() {
        let dev = AppConfig::for_environment(Environment::Development);
        assert_eq!(dev.email.provider, "mock");
        assert_eq!(dev.directory.provider, "memory");
        assert!(dev.cors.allows_any_origin());

        let staging = AppConfig::for_environment(Environment::Staging);
        assert_eq!(staging.environment, Environment::Staging);
        assert_eq!(staging.email.provider, "resend");
        assert_eq!(staging.logging.level, "info");
    }

    #[test]
    fn test_secrets_are_not_serialized() {
        let mut config = AppConfig::production();
        config.email.api_key = "re_secret".to_string();
        config.directory.api_key = "aw_secret".to_string();

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("re_secret"));
        assert!(!json.contains("aw_secret"));
    }
}
