use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use otp_api::app::create_app;
use otp_api::routes::otp::AppState;
use otp_core::services::otp::{OtpService, SmsGateway};
use otp_infra::cache::{RedisClient, RedisOtpStore};
use otp_infra::sms::{MockSmsGateway, SmsProvider, TwilioGateway};
use otp_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting OTP service");

    // Load configuration
    let config = AppConfig::from_env();

    // Connect to Redis and wrap it in the store adapter
    let redis = RedisClient::new(&config.cache)
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    match redis.health_check().await {
        Ok(true) => info!("Redis health check passed"),
        _ => warn!("Redis health check did not return PONG"),
    }
    let store = Arc::new(RedisOtpStore::new(redis));

    // Select the SMS gateway per deployment configuration
    match SmsProvider::from_env() {
        SmsProvider::Twilio => {
            let gateway = Arc::new(
                TwilioGateway::from_env()
                    .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?,
            );
            run_server(config, store, gateway).await
        }
        SmsProvider::Mock => {
            warn!("Using mock SMS gateway; no messages will be delivered");
            run_server(config, store, Arc::new(MockSmsGateway::new())).await
        }
    }
}

/// Wire the controller into an HTTP server and run it
async fn run_server<G>(
    config: AppConfig,
    store: Arc<RedisOtpStore>,
    gateway: Arc<G>,
) -> io::Result<()>
where
    G: SmsGateway + 'static,
{
    let otp_service = Arc::new(OtpService::new(store, gateway, config.otp.clone()));
    let app_state = web::Data::new(AppState {
        otp_service,
        flow_timeout: Duration::from_secs(config.server.flow_timeout),
    });

    let bind_address = config.server.bind_address();
    let client_timeout = Duration::from_secs(config.server.client_timeout);
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .client_request_timeout(client_timeout)
        .bind(&bind_address)?
        .run()
        .await
}
