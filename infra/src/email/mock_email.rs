//! Mock email service for development

use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tracing::info;

use rr_shared::utils::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Records messages in memory and logs them instead of sending
pub struct MockEmailService {
    from_address: String,
    sent: Mutex<Vec<EmailMessage>>,
}

impl MockEmailService {
    pub fn new(from_address: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    /// Messages "sent" so far
    pub fn sent_messages(&self) -> Vec<EmailMessage> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl EmailService for MockEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let message_id = format!("mock-{}", uuid::Uuid::new_v4());

        // Development aid: the text body holds the code
        info!(
            to = %mask_email(&message.to),
            subject = %message.subject,
            message_id = %message_id,
            "[MOCK EMAIL]\n{}",
            message.text
        );

        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(message.clone());

        Ok(message_id)
    }

    fn from_address(&self) -> &str {
        &self.from_address
    }

    fn provider_name(&self) -> &str {
        "Mock"
    }
}
