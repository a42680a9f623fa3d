//! Integration tests for the password reset and email verification flows

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use rr_core::domain::entities::{DirectoryUser, EmailDispatch, OtpEmail};
    use rr_core::errors::OtpErrorCode;
    use rr_core::services::lifecycle::{
        EmailServiceTrait, LifecycleConfig, OtpLifecycleService, UserDirectoryTrait,
    };
    use rr_core::services::otp::{ManualClock, OtpService, OtpServiceConfig, OtpSweeper};

    // Inbox capturing every delivered code
    #[derive(Default)]
    struct Inbox {
        messages: Mutex<Vec<OtpEmail>>,
    }

    impl Inbox {
        fn latest_code(&self, to: &str) -> String {
            self.messages
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|m| m.to == to)
                .map(|m| m.template_data.code.clone())
                .expect("no email delivered")
        }
    }

    #[async_trait]
    impl EmailServiceTrait for Inbox {
        async fn send_otp_email(&self, email: &OtpEmail) -> Result<EmailDispatch, String> {
            self.messages.lock().unwrap().push(email.clone());
            Ok(EmailDispatch::delivered("msg"))
        }
    }

    // Directory with a single account
    struct Accounts {
        users: Mutex<HashMap<String, DirectoryUser>>,
        password_updates: Mutex<Vec<(String, String)>>,
    }

    impl Accounts {
        fn with(email: &str) -> Self {
            let mut users = HashMap::new();
            users.insert(email.to_string(), DirectoryUser::new("acct-1", email));
            Self {
                users: Mutex::new(users),
                password_updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl UserDirectoryTrait for Accounts {
        async fn find_by_email(&self, email: &str) -> Result<Option<DirectoryUser>, String> {
            Ok(self.users.lock().unwrap().get(email).cloned())
        }

        async fn set_email_verified(&self, user_id: &str, verified: bool) -> Result<(), String> {
            for user in self.users.lock().unwrap().values_mut() {
                if user.id == user_id {
                    user.email_verified = verified;
                }
            }
            Ok(())
        }

        async fn set_password(&self, user_id: &str, new_password: &str) -> Result<(), String> {
            self.password_updates
                .lock()
                .unwrap()
                .push((user_id.to_string(), new_password.to_string()));
            Ok(())
        }
    }

    struct World {
        service: OtpLifecycleService<Inbox, Accounts>,
        inbox: Arc<Inbox>,
        accounts: Arc<Accounts>,
        clock: Arc<ManualClock>,
        otp: Arc<OtpService>,
    }

    fn world(email: &str) -> World {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 30, 0).unwrap(),
        ));
        let otp = Arc::new(
            OtpService::with_clock(OtpServiceConfig::default(), clock.clone()).unwrap(),
        );
        let inbox = Arc::new(Inbox::default());
        let accounts = Arc::new(Accounts::with(email));
        let service = OtpLifecycleService::new(
            otp.clone(),
            inbox.clone(),
            accounts.clone(),
            LifecycleConfig::default(),
        );
        World {
            service,
            inbox,
            accounts,
            clock,
            otp,
        }
    }

    fn wrong(code: &str) -> &'static str {
        if code == "123456" {
            "654321"
        } else {
            "123456"
        }
    }

    #[tokio::test]
    async fn test_throttle_then_lockout_scenario() {
        let email = "a@x.com";
        let w = world(email);

        assert!(w.service.request_reset(email).await.is_success());

        let throttled = w.service.request_reset(email).await;
        assert_eq!(throttled.error_code, Some(OtpErrorCode::Throttled));
        assert_eq!(throttled.retry_after_seconds, Some(180));

        let code = w.inbox.latest_code(email);
        for attempt in 1..=3 {
            let outcome = w.service.verify_reset_code(email, wrong(&code)).await;
            assert_eq!(
                outcome.error_code,
                Some(OtpErrorCode::InvalidOrExpired),
                "attempt {}",
                attempt
            );
        }

        let fourth = w.service.verify_reset_code(email, &code).await;
        assert_eq!(fourth.error_code, Some(OtpErrorCode::LockedOut));
        assert!(fourth.retry_after_seconds.unwrap() <= 120);

        w.clock.advance(Duration::minutes(2));
        assert!(w.service.verify_reset_code(email, &code).await.is_success());
    }

    #[tokio::test]
    async fn test_password_applied_exactly_once() {
        let email = "renter@example.com";
        let w = world(email);

        w.service.request_reset(email).await;
        let code = w.inbox.latest_code(email);

        assert!(w.service.verify_reset_code(email, &code).await.is_success());
        assert!(w
            .service
            .apply_new_password(email, &code, "correct-horse-battery")
            .await
            .is_success());

        let replay = w
            .service
            .apply_new_password(email, &code, "another-password")
            .await;
        assert_eq!(replay.error_code, Some(OtpErrorCode::InvalidOrExpired));

        let updates = w.accounts.password_updates.lock().unwrap();
        assert_eq!(
            *updates,
            vec![("acct-1".to_string(), "correct-horse-battery".to_string())]
        );
    }

    #[tokio::test]
    async fn test_code_rejected_after_ttl() {
        let email = "late@example.com";
        let w = world(email);

        w.service.request_email_verification(email).await;
        let code = w.inbox.latest_code(email);

        w.clock.advance(Duration::minutes(10) + Duration::seconds(1));
        let outcome = w.service.confirm_email_verification(email, &code).await;
        assert_eq!(outcome.error_code, Some(OtpErrorCode::InvalidOrExpired));
        assert!(!w.accounts.users.lock().unwrap()[email].email_verified);
    }

    #[tokio::test]
    async fn test_sweeper_reclaims_finished_flows() {
        let email = "done@example.com";
        let w = world(email);

        w.service.request_email_verification(email).await;
        let code = w.inbox.latest_code(email);
        assert!(w
            .service
            .confirm_email_verification(email, &code)
            .await
            .is_success());
        assert!(w.accounts.users.lock().unwrap()[email].email_verified);

        let sweeper = OtpSweeper::new(w.otp.clone(), std::time::Duration::from_secs(60));
        assert_eq!(sweeper.run_once().removed, 0);

        w.clock.advance(Duration::minutes(3));
        assert_eq!(sweeper.run_once().removed, 1);
        assert!(w.otp.is_empty());
    }
}
