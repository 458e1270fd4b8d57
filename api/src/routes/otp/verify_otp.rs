//! Handler for POST /api/verify-otp

use actix_web::{web, HttpResponse};
use tokio::time::timeout;
use validator::Validate;

use otp_core::services::otp::{OtpStore, SmsGateway};
use otp_shared::utils::phone::mask_phone_number;

use crate::dto::VerifyOtpRequest;

use super::{error_response, outcome_response, timeout_response, validation_response, AppState};

/// Verify a submitted OTP code for a phone number
///
/// # Request Body
///
/// ```json
/// { "user": { "phoneNumber": "+15550001234" }, "code": "123456" }
/// ```
///
/// # Responses
///
/// - 200: code matched, the number is verified
/// - 401: code expired or mismatched, trials remain
/// - 403: number is locked, or this attempt exhausted the trials
/// - 400: malformed request body
/// - 500: cache or timeout failure
pub async fn verify_otp<S, G>(
    state: web::Data<AppState<S, G>>,
    request: web::Json<VerifyOtpRequest>,
) -> HttpResponse
where
    S: OtpStore + 'static,
    G: SmsGateway + 'static,
{
    if let Err(errors) = request.validate() {
        tracing::warn!(
            phone = mask_phone_number(&request.user.phone_number),
            "Rejected verify-otp request with invalid body"
        );
        return validation_response(&errors);
    }

    let user = request.user.clone();
    tracing::info!(
        phone = mask_phone_number(&user.phone_number),
        "Processing verify-otp request"
    );

    let flow = state
        .otp_service
        .verify_otp(&user.phone_number, &request.code);

    match timeout(state.flow_timeout, flow).await {
        Err(_) => {
            tracing::error!(
                phone = mask_phone_number(&user.phone_number),
                "verify-otp flow exceeded its timeout"
            );
            timeout_response()
        }
        Ok(Err(error)) => {
            tracing::error!(
                phone = mask_phone_number(&user.phone_number),
                error = %error,
                "verify-otp flow failed"
            );
            error_response(&error)
        }
        Ok(Ok(outcome)) => outcome_response(outcome, user),
    }
}
