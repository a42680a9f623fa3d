//! Route handlers
//!
//! - `password_reset` - request, verify and apply a password reset code
//! - `email_verification` - request and confirm an email verification code

pub mod email_verification;
pub mod password_reset;
