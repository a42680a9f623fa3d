//! Domain entities representing core business objects.

pub mod otp_email;
pub mod otp_record;
pub mod user;


// Re-export commonly used types
pub use otp_email::{EmailDispatch, OtpEmail, OtpPurpose, OtpTemplateData};
pub use otp_record::{retry_after_seconds, AttemptCounter, OtpRecord, ResendCounter};
pub use user::DirectoryUser;
