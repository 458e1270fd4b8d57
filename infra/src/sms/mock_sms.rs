//! Mock SMS gateway
//!
//! Logs messages to the console instead of sending them. Selected with
//! `SMS_PROVIDER=mock`, which keeps local development free of provider
//! credentials.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use otp_core::services::otp::SmsGateway;
use otp_shared::utils::phone::mask_phone_number;

/// SMS gateway that logs instead of delivering
#[derive(Clone)]
pub struct MockSmsGateway {
    /// Counter for tracking number of messages sent
    message_count: Arc<AtomicU64>,
}

impl MockSmsGateway {
    /// Create a new mock SMS gateway
    pub fn new() -> Self {
        Self {
            message_count: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get the total number of messages sent
    pub fn message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

impl Default for MockSmsGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SmsGateway for MockSmsGateway {
    async fn send(&self, phone: &str, message: &str) -> Result<String, String> {
        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;
        let message_id = format!("mock-{}", Uuid::new_v4());

        info!(
            phone = mask_phone_number(phone),
            message_id = message_id,
            total_sent = count,
            "MOCK SMS: {}",
            message
        );

        Ok(message_id)
    }
}
