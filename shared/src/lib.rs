//! Shared utilities and common types for the RoomRent server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope used by the HTTP layer
//! - Utility functions (email validation, masking for logs)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DirectoryConfig, EmailConfig, OtpSettings,
    ServerConfig, CorsConfig, LoggingConfig,
};
pub use types::ApiResponse;
pub use utils::{mask, validation};
