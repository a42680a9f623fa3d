//! Common utility functions

pub mod mask;
pub mod validation;

// Re-export commonly used utilities
pub use mask::mask_email;
pub use validation::{email_local_part, is_numeric_code, is_valid_email};
