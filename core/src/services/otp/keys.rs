//! Cache key derivation
//!
//! Each phone number owns three cache entries, keyed by the number plus a
//! fixed suffix. The suffixes are part of the deployed data format; changing
//! them orphans live entries.

const OTP_CODE_SUFFIX: &str = "otp_code";
const OTP_TRIAL_LEFT_SUFFIX: &str = "otp_trial_left";
const OTP_LOCK_SUFFIX: &str = "lock";

/// Key holding the current OTP code for a phone number
pub fn code_key(phone: &str) -> String {
    format!("{}_{}", phone, OTP_CODE_SUFFIX)
}

/// Key holding the remaining-trials counter for a phone number
pub fn trials_key(phone: &str) -> String {
    format!("{}_{}", phone, OTP_TRIAL_LEFT_SUFFIX)
}

/// Key holding the lockout flag for a phone number
pub fn lock_key(phone: &str) -> String {
    format!("{}_{}", phone, OTP_LOCK_SUFFIX)
}
