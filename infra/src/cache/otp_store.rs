//! Redis-backed implementation of the core `OtpStore` seam

use async_trait::async_trait;
use std::time::Duration;

use otp_core::services::otp::OtpStore;

use super::redis_client::RedisClient;

/// Adapter exposing [`RedisClient`] through the core store trait
///
/// Each trait method maps to a single Redis command, so per-key atomicity
/// comes straight from the store.
#[derive(Clone)]
pub struct RedisOtpStore {
    client: RedisClient,
}

impl RedisOtpStore {
    /// Wrap a connected Redis client
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OtpStore for RedisOtpStore {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.client.get(key).await.map_err(|e| e.to_string())
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), String> {
        self.client
            .set_with_expiry(key, value, ttl.as_secs())
            .await
            .map_err(|e| e.to_string())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.client.set(key, value).await.map_err(|e| e.to_string())
    }

    async fn decrement(&self, key: &str) -> Result<i64, String> {
        self.client.decrement(key).await.map_err(|e| e.to_string())
    }

    async fn delete(&self, key: &str) -> Result<bool, String> {
        self.client.delete(key).await.map_err(|e| e.to_string())
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, String> {
        let ttl = self.client.ttl(key).await.map_err(|e| e.to_string())?;
        Ok(ttl.map(|secs| Duration::from_secs(secs as u64)))
    }
}
