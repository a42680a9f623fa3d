//! Unit tests for the email verification flow

use chrono::Duration;

use crate::errors::OtpErrorCode;

use super::mocks::{harness, EmailBehavior, MockUserDirectory};

const EMAIL: &str = "dave@example.com";

fn directory() -> MockUserDirectory {
    MockUserDirectory::new(false).with_user("user-7", EMAIL)
}

#[tokio::test]
async fn test_verification_round_trip() {
    let h = harness(EmailBehavior::Deliver, directory());

    let requested = h.service.request_email_verification(EMAIL).await;
    assert!(requested.is_success());
    {
        let sent = h.email.sent.lock().unwrap();
        assert_eq!(sent[0].subject, "Verify your RoomRent email address");
    }

    let code = h.email.last_code_for(EMAIL).unwrap();
    let confirmed = h.service.confirm_email_verification(EMAIL, &code).await;
    assert!(confirmed.is_success());
    assert_eq!(confirmed.message.as_deref(), Some("Email verified successfully"));
    assert!(h.directory.is_verified(EMAIL));
}

#[tokio::test]
async fn test_confirmation_consumes_code() {
    let h = harness(EmailBehavior::Deliver, directory());
    h.service.request_email_verification(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    assert!(h
        .service
        .confirm_email_verification(EMAIL, &code)
        .await
        .is_success());
    let replay = h.service.confirm_email_verification(EMAIL, &code).await;
    assert_eq!(replay.error_code, Some(OtpErrorCode::InvalidOrExpired));
}

#[tokio::test]
async fn test_expired_code_is_rejected() {
    let h = harness(EmailBehavior::Deliver, directory());
    h.service.request_email_verification(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    h.clock.advance(Duration::minutes(10));
    let outcome = h.service.confirm_email_verification(EMAIL, &code).await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::InvalidOrExpired));
    assert!(!h.directory.is_verified(EMAIL));
}

#[tokio::test]
async fn test_reset_and_verification_share_cooldown() {
    let h = harness(EmailBehavior::Deliver, directory());

    assert!(h.service.request_reset(EMAIL).await.is_success());
    let outcome = h.service.request_email_verification(EMAIL).await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::Throttled));
}

#[tokio::test]
async fn test_new_request_replaces_code_after_cooldown() {
    let h = harness(EmailBehavior::Deliver, directory());
    h.service.request_email_verification(EMAIL).await;
    let first = h.email.last_code_for(EMAIL).unwrap();

    h.clock.advance(Duration::minutes(3));
    assert!(h.service.request_email_verification(EMAIL).await.is_success());
    let second = h.email.last_code_for(EMAIL).unwrap();

    if first != second {
        let stale = h.service.confirm_email_verification(EMAIL, &first).await;
        assert_eq!(stale.error_code, Some(OtpErrorCode::InvalidOrExpired));
    }
    assert!(h
        .service
        .confirm_email_verification(EMAIL, &second)
        .await
        .is_success());
}

#[tokio::test]
async fn test_directory_failure_is_reported() {
    let h = harness(
        EmailBehavior::Deliver,
        MockUserDirectory::new(true).with_user("user-7", EMAIL),
    );
    h.service.request_email_verification(EMAIL).await;
    let code = h.email.last_code_for(EMAIL).unwrap();

    let outcome = h.service.confirm_email_verification(EMAIL, &code).await;
    assert_eq!(outcome.error_code, Some(OtpErrorCode::DirectoryFailed));
    assert_eq!(outcome.retry_after_seconds, None);
}
