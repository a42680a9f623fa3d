//! Unit tests for the password reset flow

use chrono::Duration;

use crate::errors::OtpErrorCode;
use crate::services::otp::VerifyOutcome;

use super::mocks::{harness, EmailBehavior, MockUserDirectory};

const EMAIL: &str = "carol@example.com";

fn directory() -> MockUserDirectory {
    MockUserDirectory::new(false).with_user("user-1", EMAIL)
}

#[tokio::test]
async fn test_request_reset_sends_email() {
    let h = harness(EmailBehavior::Deliver, directory());

    let outcome = h.service.request_reset(EMAIL).await;
    assert!(outcome.is_success());
    assert_eq!(
        outcome.message.as_deref(),
        Some("Verification code sent to your email")
    );

    let sent = h.email.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, EMAIL);
    assert_eq!(sent[0].subject, "Reset your RoomRent password");
    assert_eq!(sent[0].template_data.username, "carol");
    assert_eq!(sent[0].template_data.expires_in_minutes, 10);
    assert_eq!(sent[0].template_data.code.len(), 6);
}

#[tokio::test]
async fn test_request_reset_does_not_touch_directory() {
    let h = harness(EmailBehavior::Deliver, MockUserDirectory::new(false));

    let outcome = h.service.request_reset("ghost@example.com").await;
    assert!(outcome.is_success());
    assert_eq!(h.directory.lookup_count(), 0);
}

#[tokio::test]
async fn test_request_reset_rejects_invalid_email() {
    let h = harness(EmailBehavior::Deliver, directory());

    let outcome = h.service.request_reset("not-an-email").await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.error_code, Some(OtpErrorCode::ValidationFailed));
    assert_eq!(h.email.sent_count(), 0);
}

#[tokio::test]
async fn test_request_reset_throttled() {
    let h = harness(EmailBehavior::Deliver, directory());

    assert!(h.service.request_reset(EMAIL).await.is_success());
    h.clock.advance(Duration::seconds(30));

    let outcome = h.service.request_reset(EMAIL).await;
    assert!(!outcome.is_success());
    assert_eq!(outcome.error_code, Some(OtpErrorCode::Throttled));
    assert_eq!(outcome.retry_after_seconds, Some(150));
    assert_eq!(h.email.sent_count(), 1);
}

#[tokio::test]
async fn test_delivery_failure_keeps_cooldown() {
    let h = harness(EmailBehavior::Unreachable, directory());

    let outcome = h.service.request_reset(EMAIL).await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::DeliveryFailed));
    assert!(outcome.error.as_deref().unwrap().contains("Failed to send"));

    let retry = h.service.request_reset(EMAIL).await;
    assert_eq!(retry.error_code, Some(OtpErrorCode::Throttled));
}

#[tokio::test]
async fn test_provider_rejection_is_delivery_failure() {
    let h = harness(EmailBehavior::Reject, directory());

    let outcome = h.service.request_reset(EMAIL).await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::DeliveryFailed));
    assert!(!outcome.error.as_deref().unwrap().contains("domain not verified"));
}

#[tokio::test]
async fn test_verify_reset_code_does_not_consume() {
    let h = harness(EmailBehavior::Deliver, directory());
    h.service.request_reset(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    assert!(h.service.verify_reset_code(EMAIL, &code).await.is_success());
    assert!(h.service.verify_reset_code(EMAIL, &code).await.is_success());

    let applied = h
        .service
        .apply_new_password(EMAIL, &code, "n3w-passw0rd")
        .await;
    assert!(applied.is_success());
    assert_eq!(h.directory.password_of("user-1").as_deref(), Some("n3w-passw0rd"));
}

#[tokio::test]
async fn test_apply_new_password_consumes_code() {
    let h = harness(EmailBehavior::Deliver, directory());
    h.service.request_reset(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    assert!(h
        .service
        .apply_new_password(EMAIL, &code, "first-password")
        .await
        .is_success());

    let replay = h
        .service
        .apply_new_password(EMAIL, &code, "second-password")
        .await;
    assert_eq!(replay.error_code, Some(OtpErrorCode::InvalidOrExpired));
    assert_eq!(h.directory.password_of("user-1").as_deref(), Some("first-password"));
}

#[tokio::test]
async fn test_short_password_keeps_code() {
    let h = harness(EmailBehavior::Deliver, directory());
    h.service.request_reset(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    let outcome = h.service.apply_new_password(EMAIL, &code, "short").await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::ValidationFailed));
    assert_eq!(
        outcome.error.as_deref(),
        Some("Password must be at least 8 characters")
    );

    assert_eq!(
        h.service.otp_service().peek_verify(EMAIL, &code),
        VerifyOutcome::Accepted
    );
}

#[tokio::test]
async fn test_lockout_through_flow() {
    let h = harness(EmailBehavior::Deliver, directory());
    h.service.request_reset(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();
    let wrong = if code == "111111" { "222222" } else { "111111" };

    for _ in 0..3 {
        let outcome = h.service.verify_reset_code(EMAIL, wrong).await;
        assert_eq!(outcome.error_code, Some(OtpErrorCode::InvalidOrExpired));
    }

    let locked = h.service.verify_reset_code(EMAIL, &code).await;
    assert_eq!(locked.error_code, Some(OtpErrorCode::LockedOut));
    assert_eq!(locked.retry_after_seconds, Some(120));
}

#[tokio::test]
async fn test_unknown_user_after_valid_code() {
    let h = harness(EmailBehavior::Deliver, MockUserDirectory::new(false));
    h.service.request_reset(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    let outcome = h
        .service
        .apply_new_password(EMAIL, &code, "long-enough-pw")
        .await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::UserNotFound));
}

#[tokio::test]
async fn test_directory_failure_after_consumption() {
    let h = harness(
        EmailBehavior::Deliver,
        MockUserDirectory::new(true).with_user("user-1", EMAIL),
    );
    h.service.request_reset(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    let outcome = h
        .service
        .apply_new_password(EMAIL, &code, "long-enough-pw")
        .await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::DirectoryFailed));
    assert!(!outcome.error.as_deref().unwrap().contains("unavailable"));

    // The code was consumed before the directory call
    assert!(!h.service.otp_service().code_exists(EMAIL));
}

#[tokio::test]
async fn test_invalid_code_never_reaches_directory() {
    let h = harness(EmailBehavior::Deliver, directory());

    let outcome = h
        .service
        .apply_new_password(EMAIL, "123456", "long-enough-pw")
        .await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::InvalidOrExpired));
    assert_eq!(h.directory.lookup_count(), 0);
}
