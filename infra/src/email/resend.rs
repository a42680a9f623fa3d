//! Resend Email Service Implementation
//!
//! Sends email through the Resend HTTP API (`POST /emails`).
//!
//! ## Features
//!
//! - Bearer token authentication
//! - Automatic retry with exponential backoff on rate limits and server errors
//! - No retry on other client errors
//! - Security: Address masking in logs

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use rr_shared::config::EmailConfig;
use rr_shared::utils::mask_email;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

/// Resend service configuration
#[derive(Debug, Clone)]
pub struct ResendConfig {
    /// Resend API key
    pub api_key: String,
    /// Sender, e.g. `RoomRent <no-reply@roomrent.app>`
    pub from_address: String,
    /// API base URL without trailing slash
    pub base_url: String,
    /// Maximum send attempts
    pub max_retries: u32,
    /// Initial retry delay in milliseconds
    pub retry_delay_ms: u64,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl From<&EmailConfig> for ResendConfig {
    fn from(config: &EmailConfig) -> Self {
        Self {
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_retries: config.max_retries.max(1),
            retry_delay_ms: config.retry_delay_ms,
            request_timeout_secs: config.request_timeout_secs,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Whether a failed response status is worth retrying
pub(crate) fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// Resend email service implementation
pub struct ResendEmailService {
    client: Client,
    config: ResendConfig,
}

impl ResendEmailService {
    /// Create a new Resend email service
    pub fn new(config: ResendConfig) -> Result<Self, InfrastructureError> {
        if config.api_key.is_empty() {
            return Err(InfrastructureError::Config(
                "Resend API key is not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            base_url = %config.base_url,
            "Resend email service initialized"
        );

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/emails", self.config.base_url)
    }

    /// Send with retry logic
    async fn send_with_retry(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = Duration::from_millis(self.config.retry_delay_ms);
        let body = SendEmailRequest {
            from: &message.from,
            to: [&message.to],
            subject: &message.subject,
            html: &message.html,
            text: &message.text,
        };

        loop {
            attempts += 1;

            debug!(
                "Sending email attempt {}/{} to {}",
                attempts,
                self.config.max_retries,
                mask_email(&message.to)
            );

            let result = self
                .client
                .post(self.endpoint())
                .bearer_auth(&self.config.api_key)
                .json(&body)
                .send()
                .await;

            let failure = match result {
                Ok(response) if response.status().is_success() => {
                    let sent: SendEmailResponse = response.json().await?;
                    info!(
                        "Email sent successfully to {} with id: {}",
                        mask_email(&message.to),
                        sent.id
                    );
                    return Ok(sent.id);
                }
                Ok(response) => {
                    let status = response.status();
                    let detail = response.json::<ErrorResponse>().await.unwrap_or_default();
                    let reason = format!(
                        "Resend returned {}: {}",
                        status,
                        detail
                            .message
                            .or(detail.name)
                            .unwrap_or_else(|| "no details".to_string())
                    );

                    if !is_retryable(status) {
                        // Don't retry on client errors
                        error!("{}", reason);
                        return Err(InfrastructureError::Email(reason));
                    }
                    InfrastructureError::Email(reason)
                }
                Err(e) => InfrastructureError::Http(e),
            };

            error!(
                "Failed to send email (attempt {}/{}): {}",
                attempts, self.config.max_retries, failure
            );

            if attempts >= self.config.max_retries {
                return Err(failure);
            }

            warn!("Retrying email delivery after {:?}", delay);
            tokio::time::sleep(delay).await;
            delay *= 2; // Exponential backoff
        }
    }
}

#[async_trait]
impl EmailService for ResendEmailService {
    async fn send_email(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        self.send_with_retry(message).await
    }

    fn from_address(&self) -> &str {
        &self.config.from_address
    }

    fn provider_name(&self) -> &str {
        "Resend"
    }
}
