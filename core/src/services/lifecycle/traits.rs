//! Traits for email delivery and user directory integration

use async_trait::async_trait;

use crate::domain::entities::{DirectoryUser, EmailDispatch, OtpEmail};

/// Trait for email service integration
#[async_trait]
pub trait EmailServiceTrait: Send + Sync {
    /// Deliver a one-time code email.
    ///
    /// `Err` means the provider could not be reached; a reachable provider
    /// that refuses the message reports it through `EmailDispatch::failed`.
    async fn send_otp_email(&self, email: &OtpEmail) -> Result<EmailDispatch, String>;

    /// Check if the email address format is valid
    fn is_valid_email(&self, email: &str) -> bool {
        rr_shared::utils::is_valid_email(email)
    }
}

/// Trait for user directory integration
#[async_trait]
pub trait UserDirectoryTrait: Send + Sync {
    /// Find the account registered under an exact email address
    async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, String>;
    /// Mark an account's email as verified or unverified
    async fn set_email_verified(&self, user_id: &str, verified: bool) -> Result<(), String>;
    /// Replace an account's password
    async fn set_password(&self, user_id: &str, new_password: &str) -> Result<(), String>;
}
