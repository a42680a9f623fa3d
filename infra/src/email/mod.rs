//! Email Service Module
//!
//! This module provides email delivery for one-time codes. It includes a
//! Resend HTTP API client for production and a mock implementation for
//! development.
//!
//! ## Features
//!
//! - **Email Service Trait**: Common interface for all email providers
//! - **Mock Implementation**: Logs and records messages instead of sending
//! - **Resend Support**: Production delivery with retry and backoff
//! - **Templates**: HTML and plain text bodies for code emails
//! - **Security**: Address masking in logs

pub mod adapter;
pub mod email_service;
pub mod mock_email;
pub mod resend;
pub mod template;

// Re-export commonly used types
pub use adapter::EmailServiceAdapter;
pub use email_service::{EmailMessage, EmailService};
pub use mock_email::MockEmailService;
pub use resend::{ResendConfig, ResendEmailService};
pub use template::render_otp_email;

use rr_shared::config::EmailConfig;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Create an email service based on configuration
///
/// # Arguments
///
/// * `config` - Email configuration containing provider settings
///
/// # Returns
///
/// A boxed email service implementation, or a configuration error for an
/// unknown or misconfigured provider
pub fn create_email_service(
    config: &EmailConfig,
) -> Result<Box<dyn EmailService>, InfrastructureError> {
    match config.provider.as_str() {
        "mock" => {
            tracing::warn!("Using mock email service, codes will only be logged");
            Ok(Box::new(MockEmailService::new(config.from_address.clone())))
        }
        "resend" => {
            let service = ResendEmailService::new(ResendConfig::from(config))?;
            Ok(Box::new(service))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown email provider '{}'",
            other
        ))),
    }
}
