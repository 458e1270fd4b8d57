//! Application factory
//!
//! Builds the actix application with its middleware and routes. Kept as a
//! factory so integration tests can assemble the same app over mock
//! collaborators.

use actix_cors::Cors;
use actix_web::{web, App, HttpResponse};
use tracing_actix_web::TracingLogger;

use otp_core::services::otp::{OtpStore, SmsGateway};
use otp_shared::types::response::{ErrorResponse, HealthResponse};

use crate::routes::otp::{send_otp, verify_otp, AppState};

/// Create and configure the application
pub fn create_app<S, G>(
    app_state: web::Data<AppState<S, G>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<
            actix_web::body::EitherBody<
                tracing_actix_web::StreamSpan<actix_web::body::BoxBody>,
            >,
        >,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: OtpStore + 'static,
    G: SmsGateway + 'static,
{
    let cors = Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .wrap(cors)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // OTP endpoints
        .service(
            web::scope("/api")
                .route("/send-otp", web::post().to(send_otp::<S, G>))
                .route("/verify-otp", web::post().to(verify_otp::<S, G>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        service: "otp-gate-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Default handler for unknown routes
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        404,
        "The requested resource was not found",
    ))
}
