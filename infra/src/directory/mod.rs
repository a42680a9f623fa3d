//! User Directory Module
//!
//! Implementations of the core `UserDirectoryTrait`:
//! - **Appwrite**: Users API of an Appwrite project
//! - **Memory**: Process-local accounts for development and tests

pub mod appwrite;
pub mod memory;

pub use appwrite::{AppwriteConfig, AppwriteUserDirectory};
pub use memory::InMemoryUserDirectory;

use async_trait::async_trait;
use rr_core::domain::entities::DirectoryUser;
use rr_core::services::lifecycle::UserDirectoryTrait;
use rr_shared::config::DirectoryConfig;

use crate::InfrastructureError;

#[cfg(test)]
mod tests;

/// Directory selected at startup
pub enum UserDirectoryService {
    Appwrite(AppwriteUserDirectory),
    Memory(InMemoryUserDirectory),
}

impl UserDirectoryService {
    pub fn provider_name(&self) -> &str {
        match self {
            UserDirectoryService::Appwrite(_) => "Appwrite",
            UserDirectoryService::Memory(_) => "Memory",
        }
    }
}

#[async_trait]
impl UserDirectoryTrait for UserDirectoryService {
    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, String> {
        match self {
            UserDirectoryService::Appwrite(directory) => directory.find_by_email(email).await,
            UserDirectoryService::Memory(directory) => directory.find_by_email(email).await,
        }
    }

    async fn set_email_verified(&self, user_id: &str, verified: bool) -> Result<(), String> {
        match self {
            UserDirectoryService::Appwrite(directory) => {
                directory.set_email_verified(user_id, verified).await
            }
            UserDirectoryService::Memory(directory) => {
                directory.set_email_verified(user_id, verified).await
            }
        }
    }

    async fn set_password(&self, user_id: &str, new_password: &str) -> Result<(), String> {
        match self {
            UserDirectoryService::Appwrite(directory) => {
                directory.set_password(user_id, new_password).await
            }
            UserDirectoryService::Memory(directory) => {
                directory.set_password(user_id, new_password).await
            }
        }
    }
}

/// Create the user directory named by the configuration
pub fn create_user_directory(
    config: &DirectoryConfig,
) -> Result<UserDirectoryService, InfrastructureError> {
    match config.provider.as_str() {
        "memory" => {
            let directory = InMemoryUserDirectory::new();
            for email in &config.seed_users {
                directory.add_user(email, None);
            }

            if directory.is_empty() {
                tracing::warn!(
                    event = "directory_empty",
                    "In-memory user directory has no accounts, set RR__DIRECTORY__SEED_USERS to create some"
                );
            } else {
                tracing::warn!(
                    accounts = directory.len(),
                    event = "directory_seeded",
                    "Using in-memory user directory, accounts are not persisted"
                );
            }
            Ok(UserDirectoryService::Memory(directory))
        }
        "appwrite" => {
            let directory = AppwriteUserDirectory::new(AppwriteConfig::from(config))?;
            Ok(UserDirectoryService::Appwrite(directory))
        }
        other => Err(InfrastructureError::Config(format!(
            "Unknown directory provider '{}'",
            other
        ))),
    }
}
