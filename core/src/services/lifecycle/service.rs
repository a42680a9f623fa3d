//! Lifecycle service orchestrating code issuance, delivery and directory updates

use std::sync::Arc;

use rr_shared::utils::{email_local_part, mask_email};

use crate::domain::entities::{DirectoryUser, OtpEmail, OtpPurpose, OtpTemplateData};
use crate::errors::OtpError;
use crate::services::otp::{OtpService, VerifyMode};

use super::config::LifecycleConfig;
use super::traits::{EmailServiceTrait, UserDirectoryTrait};
use super::types::ActionOutcome;

/// Password reset and email verification flows over the OTP engine
pub struct OtpLifecycleService<E: EmailServiceTrait, D: UserDirectoryTrait> {
    /// Code engine shared with the background sweeper
    otp_service: Arc<OtpService>,
    /// Email delivery
    email_service: Arc<E>,
    /// User directory
    directory: Arc<D>,
    /// Service configuration
    config: LifecycleConfig,
}

impl<E: EmailServiceTrait, D: UserDirectoryTrait> OtpLifecycleService<E, D> {
    /// Create a new lifecycle service
    ///
    /// # Arguments
    ///
    /// * `otp_service` - Code engine
    /// * `email_service` - Email delivery implementation
    /// * `directory` - User directory implementation
    /// * `config` - Service configuration
    pub fn new(
        otp_service: Arc<OtpService>,
        email_service: Arc<E>,
        directory: Arc<D>,
        config: LifecycleConfig,
    ) -> Self {
        Self {
            otp_service,
            email_service,
            directory,
            config,
        }
    }

    pub fn otp_service(&self) -> &Arc<OtpService> {
        &self.otp_service
    }

    /// Issue and email a password reset code.
    ///
    /// Works for any well-formed address; the directory is not consulted,
    /// so the response does not reveal whether an account exists.
    pub async fn request_reset(&self, email: &str) -> ActionOutcome {
        let result = self.send_code(email, OtpPurpose::PasswordReset).await;
        Self::finish("request_reset", email, result)
    }

    /// Check a password reset code without consuming it
    pub async fn verify_reset_code(&self, email: &str, code: &str) -> ActionOutcome {
        let result = self
            .check_code(email, code, VerifyMode::Peek)
            .map(|_| String::from("Verification code is valid"));
        Self::finish("verify_reset_code", email, result)
    }

    /// Consume a password reset code and set the new password.
    ///
    /// The password length is checked first so a too-short password does
    /// not burn the code.
    pub async fn apply_new_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> ActionOutcome {
        let result = self.reset_password(email, code, new_password).await;
        Self::finish("apply_new_password", email, result)
    }

    /// Issue and email an email verification code
    pub async fn request_email_verification(&self, email: &str) -> ActionOutcome {
        let result = self.send_code(email, OtpPurpose::EmailVerification).await;
        Self::finish("request_email_verification", email, result)
    }

    /// Consume an email verification code and mark the address verified
    pub async fn confirm_email_verification(&self, email: &str, code: &str) -> ActionOutcome {
        let result = self.verify_email(email, code).await;
        Self::finish("confirm_email_verification", email, result)
    }

    async fn send_code(&self, email: &str, purpose: OtpPurpose) -> Result<String, OtpError> {
        if !self.email_service.is_valid_email(email) {
            return Err(OtpError::validation("Please provide a valid email address"));
        }

        // The cooldown stays consumed even if delivery fails below
        let issued = self.otp_service.issue(email)?;

        let message = OtpEmail::new(
            email,
            purpose,
            &self.config.app_name,
            OtpTemplateData {
                username: email_local_part(email).to_string(),
                code: issued.code,
                expires_in_minutes: self.otp_service.config().ttl_minutes(),
            },
        );

        let dispatch = self
            .email_service
            .send_otp_email(&message)
            .await
            .map_err(|reason| OtpError::Delivery { reason })?;

        if !dispatch.success {
            return Err(OtpError::Delivery {
                reason: dispatch
                    .error
                    .unwrap_or_else(|| String::from("provider rejected the message")),
            });
        }

        tracing::info!(
            email = %mask_email(email),
            purpose = purpose.as_str(),
            message_id = dispatch.message_id.as_deref().unwrap_or("unknown"),
            event = "otp_email_sent",
            "Sent one-time code email"
        );

        Ok(String::from("Verification code sent to your email"))
    }

    fn check_code(&self, email: &str, code: &str, mode: VerifyMode) -> Result<(), OtpError> {
        self.otp_service.verify(email, code, mode).into_result()
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<String, OtpError> {
        let min = self.config.min_password_length;
        if new_password.chars().count() < min {
            return Err(OtpError::validation(format!(
                "Password must be at least {} characters",
                min
            )));
        }

        self.check_code(email, code, VerifyMode::Consume)?;

        let user = self.find_user(email).await?;
        self.directory
            .set_password(&user.id, new_password)
            .await
            .map_err(|reason| OtpError::Directory { reason })?;

        Ok(String::from("Password has been reset successfully"))
    }

    async fn verify_email(&self, email: &str, code: &str) -> Result<String, OtpError> {
        self.check_code(email, code, VerifyMode::Consume)?;

        let user = self.find_user(email).await?;
        self.directory
            .set_email_verified(&user.id, true)
            .await
            .map_err(|reason| OtpError::Directory { reason })?;

        Ok(String::from("Email verified successfully"))
    }

    /// Resolves the account for `email`; only called after a code matched
    async fn find_user(&self, email: &str) -> Result<DirectoryUser, OtpError> {
        self.directory
            .find_by_email(email)
            .await
            .map_err(|reason| OtpError::Directory { reason })?
            .ok_or(OtpError::UserNotFound)
    }

    fn finish(action: &'static str, email: &str, result: Result<String, OtpError>) -> ActionOutcome {
        if let Err(error) = &result {
            let email = mask_email(email);
            match error {
                OtpError::Delivery { reason } | OtpError::Directory { reason } => {
                    tracing::error!(
                        action = action,
                        email = %email,
                        error_code = error.code().as_str(),
                        reason = %reason,
                        "Lifecycle operation failed upstream"
                    );
                }
                _ => {
                    tracing::info!(
                        action = action,
                        email = %email,
                        error_code = error.code().as_str(),
                        "Lifecycle operation rejected"
                    );
                }
            }
        }
        ActionOutcome::from(result)
    }
}
