//! Unit tests for the email adapter

use async_trait::async_trait;

use rr_core::domain::entities::{OtpEmail, OtpPurpose, OtpTemplateData};
use rr_core::services::lifecycle::EmailServiceTrait;

use crate::email::{EmailMessage, EmailService, EmailServiceAdapter, MockEmailService};
use crate::InfrastructureError;

struct RefusingProvider;

#[async_trait]
impl EmailService for RefusingProvider {
    async fn send_email(&self, _message: &EmailMessage) -> Result<String, InfrastructureError> {
        Err(InfrastructureError::Email("Resend returned 403: domain not verified".to_string()))
    }

    fn from_address(&self) -> &str {
        "no-reply@roomrent.app"
    }

    fn provider_name(&self) -> &str {
        "Refusing"
    }
}

struct BrokenProvider;

#[async_trait]
impl EmailService for BrokenProvider {
    async fn send_email(&self, _message: &EmailMessage) -> Result<String, InfrastructureError> {
        Err(InfrastructureError::General("connection reset".to_string()))
    }

    fn from_address(&self) -> &str {
        "no-reply@roomrent.app"
    }

    fn provider_name(&self) -> &str {
        "Broken"
    }
}

fn otp_email() -> OtpEmail {
    OtpEmail::new(
        "erin@example.com",
        OtpPurpose::EmailVerification,
        "RoomRent",
        OtpTemplateData {
            username: "erin".to_string(),
            code: "731904".to_string(),
            expires_in_minutes: 10,
        },
    )
}

#[tokio::test]
async fn test_mock_delivery_reports_message_id() {
    let adapter = EmailServiceAdapter::new(
        Box::new(MockEmailService::new("RoomRent <no-reply@roomrent.app>")),
        "RoomRent",
    );

    let dispatch = adapter.send_otp_email(&otp_email()).await.unwrap();
    assert!(dispatch.success);
    assert!(dispatch.message_id.unwrap().starts_with("mock-"));
    assert_eq!(adapter.provider_name(), "Mock");
}

#[tokio::test]
async fn test_provider_refusal_is_a_failed_dispatch() {
    let adapter = EmailServiceAdapter::new(Box::new(RefusingProvider), "RoomRent");

    let dispatch = adapter.send_otp_email(&otp_email()).await.unwrap();
    assert!(!dispatch.success);
    assert!(dispatch.error.unwrap().contains("403"));
}

#[tokio::test]
async fn test_transport_error_is_an_error() {
    let adapter = EmailServiceAdapter::new(Box::new(BrokenProvider), "RoomRent");

    let result = adapter.send_otp_email(&otp_email()).await;
    assert!(result.unwrap_err().contains("connection reset"));
}

#[tokio::test]
async fn test_message_uses_provider_sender() {
    let mock = MockEmailService::new("RoomRent <no-reply@roomrent.app>");
    let message = EmailMessage {
        from: mock.from_address().to_string(),
        to: "erin@example.com".to_string(),
        subject: "subject".to_string(),
        html: String::new(),
        text: "731904".to_string(),
    };
    mock.send_email(&message).await.unwrap();

    let sent = mock.sent_messages();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].from, "RoomRent <no-reply@roomrent.app>");
}
