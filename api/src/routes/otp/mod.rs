//! OTP endpoints: shared state, outcome translation, and error translation

pub mod send_otp;
pub mod verify_otp;

use std::sync::Arc;
use std::time::Duration;

use actix_web::HttpResponse;
use validator::ValidationErrors;

use otp_core::errors::OtpError;
use otp_core::services::otp::{OtpService, OtpStore, Outcome, SmsGateway};
use otp_shared::types::response::{ErrorResponse, SuccessResponse};

use crate::dto::{OtpUser, TimeData, TrialsData};

pub use send_otp::send_otp;
pub use verify_otp::verify_otp;

/// Application state shared across OTP handlers
pub struct AppState<S, G>
where
    S: OtpStore,
    G: SmsGateway,
{
    /// The lifecycle controller
    pub otp_service: Arc<OtpService<S, G>>,
    /// Bound on a single send or verify flow
    pub flow_timeout: Duration,
}

/// Translate a controller outcome into the HTTP response for it
///
/// Exhaustive over the outcome enumeration: every variant has exactly one
/// status code and envelope shape.
pub(crate) fn outcome_response(outcome: Outcome, user: OtpUser) -> HttpResponse {
    match outcome {
        Outcome::Sent { trials_left } => HttpResponse::Ok().json(SuccessResponse::new(
            200,
            "Successfully send OTP message",
            TrialsData {
                user,
                trials: trials_left,
            },
        )),
        Outcome::Locked { ttl_minutes } => HttpResponse::Forbidden().json(SuccessResponse::new(
            403,
            format!(
                "User is prohibited from making OTP requests, try after {} minutes",
                ttl_minutes
            ),
            TimeData {
                user,
                ttl: ttl_minutes,
            },
        )),
        Outcome::Expired { trials_left } => {
            HttpResponse::Unauthorized().json(SuccessResponse::new(
                401,
                "OTP expired, try again",
                TrialsData {
                    user,
                    trials: trials_left,
                },
            ))
        }
        Outcome::ExpiredAndLocked { ttl_minutes } => {
            HttpResponse::Forbidden().json(SuccessResponse::new(
                403,
                format!(
                    "OTP expired and max limit reached, try after {} minutes",
                    ttl_minutes
                ),
                TimeData {
                    user,
                    ttl: ttl_minutes,
                },
            ))
        }
        Outcome::Mismatch { trials_left } => {
            HttpResponse::Unauthorized().json(SuccessResponse::new(
                401,
                "Incorrect OTP, try again",
                TrialsData {
                    user,
                    trials: trials_left,
                },
            ))
        }
        Outcome::MismatchAndLocked { ttl_minutes } => {
            HttpResponse::Forbidden().json(SuccessResponse::new(
                403,
                format!(
                    "Incorrect OTP and max limit reached, try after {} minutes",
                    ttl_minutes
                ),
                TimeData {
                    user,
                    ttl: ttl_minutes,
                },
            ))
        }
        Outcome::Verified { phone } => HttpResponse::Ok().json(SuccessResponse::new(
            200,
            "Successfully verified user",
            phone,
        )),
    }
}

/// Translate a domain error into the HTTP error envelope
pub(crate) fn error_response(error: &OtpError) -> HttpResponse {
    match error {
        OtpError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new(400, message.clone()))
        }
        other => {
            HttpResponse::InternalServerError().json(ErrorResponse::new(500, other.to_string()))
        }
    }
}

/// Response for a request body that failed validation
pub(crate) fn validation_response(errors: &ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(400, errors.to_string()))
}

/// Response for a flow that outran its timeout
pub(crate) fn timeout_response() -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(500, "Request timed out"))
}
