//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Pragmatic email shape check: one `@`, non-empty local part, dotted domain.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Maximum length of an email address (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Check whether a string looks like a deliverable email address
///
/// The check is intentionally shape-only; the address is used verbatim
/// (case-sensitive) as the OTP identity key.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(email)
}

/// Check whether a string is a numeric code of exactly `length` digits
pub fn is_numeric_code(code: &str, length: usize) -> bool {
    code.len() == length && code.chars().all(|c| c.is_ascii_digit())
}

/// Local part of an email address, used as a display name in messages
pub fn email_local_part(email: &str) -> &str {
    match email.split_once('@') {
        Some((local, _)) if !local.is_empty() => local,
        _ => email,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(is_valid_email("User@Example.COM"));

        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("a@x"));
        assert!(!is_valid_email("a b@x.com"));
        assert!(!is_valid_email(&format!("{}@x.com", "a".repeat(260))));
    }

    #[test]
    fn test_is_numeric_code() {
        assert!(is_numeric_code("123456", 6));
        assert!(is_numeric_code("000000", 6));
        assert!(!is_numeric_code("12345", 6));
        assert!(!is_numeric_code("12345a", 6));
        assert!(!is_numeric_code("1234567", 6));
    }

    #[test]
    fn test_email_local_part() {
        assert_eq!(email_local_part("jane.doe@x.com"), "jane.doe");
        assert_eq!(email_local_part("plain"), "plain");
        assert_eq!(email_local_part("@x.com"), "@x.com");
    }
}
