//! Shared fixtures for route tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use rr_api::AppState;
use rr_core::domain::entities::{EmailDispatch, OtpEmail};
use rr_core::services::lifecycle::{EmailServiceTrait, LifecycleConfig, OtpLifecycleService};
use rr_core::services::otp::{ManualClock, OtpService, OtpServiceConfig};
use rr_infra::directory::InMemoryUserDirectory;
use rr_shared::config::CorsConfig;

pub const MAX_PAYLOAD: usize = 16 * 1024;

/// Email double that keeps every message it was asked to send
#[derive(Default)]
pub struct RecordingEmail {
    sent: Mutex<Vec<OtpEmail>>,
    pub offline: bool,
}

impl RecordingEmail {
    pub fn offline() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            offline: true,
        }
    }

    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|email| email.to == to)
            .map(|email| email.template_data.code.clone())
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailServiceTrait for RecordingEmail {
    async fn send_otp_email(&self, email: &OtpEmail) -> Result<EmailDispatch, String> {
        if self.offline {
            return Err("connection refused".to_string());
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(EmailDispatch::delivered(format!("test-{}", self.sent_count())))
    }
}

pub struct TestContext {
    pub state: actix_web::web::Data<AppState<RecordingEmail, InMemoryUserDirectory>>,
    pub email: Arc<RecordingEmail>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub clock: Arc<ManualClock>,
}

pub fn context() -> TestContext {
    context_with(RecordingEmail::default())
}

pub fn context_with(email: RecordingEmail) -> TestContext {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
    ));
    let otp = Arc::new(OtpService::with_clock(OtpServiceConfig::default(), clock.clone()).unwrap());
    let email = Arc::new(email);
    let directory = Arc::new(InMemoryUserDirectory::with_cost(4));
    directory.add_user("jane@example.com", Some("Jane"));

    let lifecycle = Arc::new(OtpLifecycleService::new(
        otp,
        email.clone(),
        directory.clone(),
        LifecycleConfig::default(),
    ));

    TestContext {
        state: actix_web::web::Data::new(AppState::new(lifecycle)),
        email,
        directory,
        clock,
    }
}

pub fn cors() -> CorsConfig {
    CorsConfig::development()
}
