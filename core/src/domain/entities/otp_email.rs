//! Outbound one-time code email and its delivery report.

use serde::{Deserialize, Serialize};

/// Why a code is being sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    PasswordReset,
    EmailVerification,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::PasswordReset => "password_reset",
            OtpPurpose::EmailVerification => "email_verification",
        }
    }

    /// Email subject line for this purpose
    pub fn subject(&self, app_name: &str) -> String {
        match self {
            OtpPurpose::PasswordReset => format!("Reset your {} password", app_name),
            OtpPurpose::EmailVerification => format!("Verify your {} email address", app_name),
        }
    }
}

/// Values substituted into the email template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpTemplateData {
    /// Greeting name; the local part of the recipient address
    pub username: String,

    /// The plaintext code
    pub code: String,

    /// Code lifetime shown to the user
    pub expires_in_minutes: u64,
}

/// A one-time code email ready for delivery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpEmail {
    pub to: String,
    pub subject: String,
    pub purpose: OtpPurpose,
    pub template_data: OtpTemplateData,
}

impl OtpEmail {
    pub fn new(
        to: impl Into<String>,
        purpose: OtpPurpose,
        app_name: &str,
        template_data: OtpTemplateData,
    ) -> Self {
        Self {
            to: to.into(),
            subject: purpose.subject(app_name),
            purpose,
            template_data,
        }
    }
}

/// Result reported by an email provider for one send
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDispatch {
    pub success: bool,

    /// Provider message identifier on success
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,

    /// Provider error description on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EmailDispatch {
    pub fn delivered(message_id: impl Into<String>) -> Self {
        Self {
            success: true,
            message_id: Some(message_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error.into()),
        }
    }
}
