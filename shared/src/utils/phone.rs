//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 format: leading +, country code 1-9, up to 15 digits total
static E164_PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").unwrap());

/// Normalize a phone number by removing common formatting characters
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_phone_number(phone: &str) -> bool {
    let normalized = normalize_phone_number(phone);
    E164_PHONE_REGEX.is_match(&normalized)
}

/// Mask a phone number for logging, keeping only the last 4 digits
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = normalize_phone_number(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
