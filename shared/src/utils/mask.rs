//! Masking helpers for logging personal data

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the full domain.
///
/// # Example
///
/// ```
/// use rr_shared::utils::mask_email;
/// assert_eq!(mask_email("alice@example.com"), "a****@example.com");
/// ```
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let mut chars = local.chars();
            let first = chars.next().unwrap_or('*');
            let hidden = chars.count().max(1);
            format!("{}{}@{}", first, "*".repeat(hidden), domain)
        }
        _ => "*".repeat(email.chars().count().min(8)),
    }
}
