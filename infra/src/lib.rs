//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the RoomRent backend.
//! It provides concrete implementations for the collaborators the core flows
//! depend on.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Email**: Resend HTTP API client and a mock provider for development
//! - **Directory**: Appwrite users API client and an in-memory directory
//! - **Config**: Layered configuration loading (defaults, file, environment)

use std::sync::Arc;

use rr_shared::config::AppConfig;

// Re-export core types for convenience
pub use rr_core::errors::*;

/// Configuration loading
pub mod config;

/// Email delivery providers
pub mod email;

/// User directory providers
pub mod directory;

use directory::{create_user_directory, UserDirectoryService};
use email::{create_email_service, EmailServiceAdapter};

/// Infrastructure service container
#[derive(Clone)]
pub struct InfrastructureServices {
    /// Email delivery, exposed through the core trait
    pub email: Arc<EmailServiceAdapter>,
    /// User directory, exposed through the core trait
    pub directory: Arc<UserDirectoryService>,
}

/// Initialize infrastructure services
///
/// This function sets up:
/// - The configured email provider
/// - The configured user directory
pub fn initialize(config: &AppConfig) -> Result<InfrastructureServices, InfrastructureError> {
    tracing::info!("Initializing infrastructure services...");

    let email_service = create_email_service(&config.email)?;
    let email = Arc::new(EmailServiceAdapter::new(email_service, &config.otp.app_name));
    let directory = Arc::new(create_user_directory(&config.directory)?);

    tracing::info!(
        email_provider = email.provider_name(),
        directory_provider = directory.provider_name(),
        "Infrastructure services initialized successfully"
    );

    Ok(InfrastructureServices { email, directory })
}

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// HTTP request error for external services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration source error
    #[error("Configuration error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Email provider refused or failed the message
    #[error("Email service error: {0}")]
    Email(String),

    /// User directory error
    #[error("Directory error: {0}")]
    Directory(String),

    /// General infrastructure error
    #[error("Infrastructure error: {0}")]
    General(String),
}
