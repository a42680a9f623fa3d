use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Numeric one-time code
pub static CODE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4,12}$").expect("code regex is valid"));

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RequestCodeRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(regex(path = "CODE_REGEX", message = "Code must be numeric"))]
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyNewPasswordRequest {
    #[validate(email(message = "Please provide a valid email address"))]
    pub email: String,
    #[validate(regex(path = "CODE_REGEX", message = "Code must be numeric"))]
    pub code: String,
    #[validate(length(max = 256, message = "Password is too long"))]
    pub new_password: String,
}
