//! Email Service Trait Adapter
//!
//! Implements the core `EmailServiceTrait` over any infrastructure
//! `EmailService`, rendering the code email before handing it to the
//! provider.

use async_trait::async_trait;
use rr_core::domain::entities::{EmailDispatch, OtpEmail};
use rr_core::services::lifecycle::EmailServiceTrait;

use super::email_service::{EmailMessage, EmailService};
use super::template::render_otp_email;
use crate::InfrastructureError;

/// Adapter that implements the core EmailServiceTrait
pub struct EmailServiceAdapter {
    inner: Box<dyn EmailService>,
    app_name: String,
}

impl EmailServiceAdapter {
    pub fn new(inner: Box<dyn EmailService>, app_name: impl Into<String>) -> Self {
        Self {
            inner,
            app_name: app_name.into(),
        }
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    fn build_message(&self, email: &OtpEmail) -> EmailMessage {
        let rendered = render_otp_email(email, &self.app_name);
        EmailMessage {
            from: self.inner.from_address().to_string(),
            to: email.to.clone(),
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        }
    }
}

#[async_trait]
impl EmailServiceTrait for EmailServiceAdapter {
    async fn send_otp_email(&self, email: &OtpEmail) -> Result<EmailDispatch, String> {
        let message = self.build_message(email);

        match self.inner.send_email(&message).await {
            Ok(message_id) => Ok(EmailDispatch::delivered(message_id)),
            // The provider answered and refused the message
            Err(InfrastructureError::Email(reason)) => Ok(EmailDispatch::failed(reason)),
            Err(e) => Err(e.to_string()),
        }
    }
}
