//! Provider-agnostic email interface

use async_trait::async_trait;
use serde::Serialize;

use crate::InfrastructureError;

/// A fully rendered outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Trait implemented by every email provider
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Send a message and return the provider's message id
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError>;

    /// Sender address used in the `From` header
    fn from_address(&self) -> &str;

    fn provider_name(&self) -> &str;
}
