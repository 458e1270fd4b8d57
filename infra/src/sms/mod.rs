//! SMS gateway module
//!
//! Implementations of the core `SmsGateway` seam:
//! - **Mock**: logs messages instead of sending them, for development
//! - **Twilio**: production delivery via the Twilio API (feature-gated)
//!
//! Phone numbers are always masked before they reach a log line.

pub mod mock_sms;

#[cfg(feature = "twilio-sms")]
pub mod twilio;

pub use mock_sms::MockSmsGateway;

#[cfg(feature = "twilio-sms")]
pub use twilio::{TwilioConfig, TwilioGateway};

/// Which SMS provider a deployment uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmsProvider {
    /// Console-logging mock for development
    Mock,
    /// Twilio API delivery
    Twilio,
}

impl SmsProvider {
    /// Read the provider selection from `SMS_PROVIDER`
    ///
    /// Unknown values fall back to the mock with a warning, so a fresh
    /// checkout runs without provider credentials.
    pub fn from_env() -> Self {
        match std::env::var("SMS_PROVIDER").as_deref() {
            Ok("twilio") => SmsProvider::Twilio,
            Ok("mock") | Err(_) => SmsProvider::Mock,
            Ok(other) => {
                tracing::warn!(
                    "Unknown SMS provider '{}', using mock implementation",
                    other
                );
                SmsProvider::Mock
            }
        }
    }
}
