//! Twilio SMS gateway implementation
//!
//! Production delivery through the Twilio API. Every send is a single
//! attempt; a provider failure surfaces to the caller and is never retried
//! here.

use async_trait::async_trait;
use tracing::{error, info};
use twilio::{Client, OutboundMessage};

use otp_core::services::otp::SmsGateway;
use otp_shared::utils::phone::mask_phone_number;

use crate::InfrastructureError;

/// Twilio gateway configuration
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    /// Twilio Account SID
    pub account_sid: String,
    /// Twilio Auth Token
    pub auth_token: String,
    /// From phone number (must be a Twilio phone number)
    pub from_number: String,
}

impl TwilioConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .map_err(|_| InfrastructureError::Config("TWILIO_ACCOUNT_SID not set".to_string()))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .map_err(|_| InfrastructureError::Config("TWILIO_AUTH_TOKEN not set".to_string()))?;
        let from_number = std::env::var("TWILIO_FROM_NUMBER")
            .map_err(|_| InfrastructureError::Config("TWILIO_FROM_NUMBER not set".to_string()))?;

        if !from_number.starts_with('+') {
            return Err(InfrastructureError::Config(
                "TWILIO_FROM_NUMBER must be in E.164 format (starting with '+')".to_string(),
            ));
        }

        Ok(Self {
            account_sid,
            auth_token,
            from_number,
        })
    }
}

/// Twilio SMS gateway
pub struct TwilioGateway {
    client: Client,
    config: TwilioConfig,
}

impl TwilioGateway {
    /// Create a new Twilio gateway
    pub fn new(config: TwilioConfig) -> Self {
        let client = Client::new(&config.account_sid, &config.auth_token);

        info!(
            "Twilio SMS gateway initialized with from number: {}",
            mask_phone_number(&config.from_number)
        );

        Self { client, config }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self, InfrastructureError> {
        Ok(Self::new(TwilioConfig::from_env()?))
    }
}

#[async_trait]
impl SmsGateway for TwilioGateway {
    async fn send(&self, phone: &str, message: &str) -> Result<String, String> {
        let msg = OutboundMessage::new(&self.config.from_number, phone, message);

        match self.client.send_message(msg).await {
            Ok(response) => {
                info!(
                    phone = mask_phone_number(phone),
                    sid = %response.sid,
                    "SMS sent via Twilio"
                );
                Ok(response.sid)
            }
            Err(e) => {
                error!(
                    phone = mask_phone_number(phone),
                    error = %e,
                    "Failed to send SMS via Twilio"
                );
                Err(format!("Twilio send failed: {}", e))
            }
        }
    }
}
