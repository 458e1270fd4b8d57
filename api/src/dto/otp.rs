//! OTP endpoint DTOs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use otp_shared::utils::phone::is_valid_phone_number;

/// A phone number as it travels through request and response bodies
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OtpUser {
    /// Phone number in E.164 format, e.g. "+15550001234"
    #[validate(custom = "validate_phone")]
    pub phone_number: String,
}

/// Request body for POST /api/send-otp
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpRequest {
    /// Phone number in E.164 format
    #[validate(custom = "validate_phone")]
    pub phone_number: String,
}

/// Request body for POST /api/verify-otp
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyOtpRequest {
    /// The phone number being verified
    #[validate]
    pub user: OtpUser,

    /// 6-digit verification code
    #[validate(length(equal = 6), custom = "validate_code_digits")]
    pub code: String,
}

/// Payload carrying the remaining verification trials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrialsData {
    pub user: OtpUser,
    pub trials: i64,
}

/// Payload carrying the minutes left on a lockout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeData {
    pub user: OtpUser,
    pub ttl: i64,
}

fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if is_valid_phone_number(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone_number"))
    }
}

fn validate_code_digits(code: &str) -> Result<(), ValidationError> {
    if code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_code"))
    }
}
