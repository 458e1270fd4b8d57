//! Handler for POST /api/send-otp

use actix_web::{web, HttpResponse};
use tokio::time::timeout;
use validator::Validate;

use otp_core::services::otp::{OtpStore, SmsGateway};
use otp_shared::utils::phone::mask_phone_number;

use crate::dto::{OtpUser, SendOtpRequest};

use super::{error_response, outcome_response, timeout_response, validation_response, AppState};

/// Send a fresh OTP code to a phone number
///
/// # Request Body
///
/// ```json
/// { "phoneNumber": "+15550001234" }
/// ```
///
/// # Responses
///
/// - 200: code dispatched, body carries the remaining trials
/// - 403: number is locked, body carries the minutes left on the lock
/// - 400: malformed request body or invalid phone number
/// - 500: cache, delivery, or timeout failure
pub async fn send_otp<S, G>(
    state: web::Data<AppState<S, G>>,
    request: web::Json<SendOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    G: SmsGateway + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(
            phone = mask_phone_number(&request.phone_number),
            "Rejected send-otp request with invalid body"
        );
        return validation_response(&errors);
    }

    let phone = request.phone_number.clone();
    tracing::info!(
        phone = mask_phone_number(&phone),
        "Processing send-otp request"
    );

    match timeout(state.flow_timeout, state.otp_service.request_otp(&phone)).await {
        Err(_) => {
            tracing::error!(
                phone = mask_phone_number(&phone),
                "send-otp flow exceeded its timeout"
            );
            timeout_response()
        }
        Ok(Err(error)) => {
            tracing::error!(
                phone = mask_phone_number(&phone),
                error = %error,
                "send-otp flow failed"
            );
            error_response(&error)
        }
        Ok(Ok(outcome)) => outcome_response(
            outcome,
            OtpUser {
                phone_number: phone,
            },
        ),
    }
}
