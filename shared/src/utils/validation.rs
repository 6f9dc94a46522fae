//! Common validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Maximum length of an address per RFC 5321
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Local part and domain of an addr-spec; the domain needs at least one dot
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
    )
    .expect("email regex is valid")
});

/// Check whether an email address is syntactically well-formed
///
/// Rejects empty input, addresses longer than 254 characters, local parts
/// that start or end with a dot or contain consecutive dots.
pub fn is_valid_email(email: &str) -> bool {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return false;
    }
    if !EMAIL_REGEX.is_match(email) {
        return false;
    }

    let local = match email.rsplit_once('@') {
        Some((local, _)) => local,
        None => return false,
    };
    local.len() <= 64 && !local.starts_with('.') && !local.ends_with('.') && !local.contains("..")
}

/// Mask an email address for logging
///
/// Keeps the first character of the local part and the whole domain:
/// `john.doe@example.com` becomes `j***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => match local.chars().next() {
            Some(first) => format!("{}***@{}", first, domain),
            None => format!("***@{}", domain),
        },
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co.uk"));
        assert!(is_valid_email("x_y-z@sub-domain.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email(".user@example.com"));
        assert!(!is_valid_email("user..name@example.com"));
        assert!(!is_valid_email("user@-example.com"));
    }

    #[test]
    fn test_overlong_email_rejected() {
        let email = format!("{}@example.com", "a".repeat(250));
        assert!(!is_valid_email(&email));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("john.doe@example.com"), "j***@example.com");
        assert_eq!(mask_email("@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
