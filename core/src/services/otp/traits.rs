//! Traits for store and gateway integration

use async_trait::async_trait;
use std::time::Duration;

/// Trait for the time-expiring key-value store backing the OTP state
///
/// Each method maps to a single store command and is individually atomic;
/// the controller provides no cross-operation atomicity on top.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Fetch a value; `None` when the key is absent or expired
    async fn get(&self, key: &str) -> Result<Option<String>, String>;
    /// Store a value that the store evicts after `ttl`
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> Result<(), String>;
    /// Store a value with no expiry
    async fn set(&self, key: &str, value: &str) -> Result<(), String>;
    /// Atomically decrement an integer value, returning the new value
    async fn decrement(&self, key: &str) -> Result<i64, String>;
    /// Delete a key; returns whether it existed. Deleting an absent key is not an error
    async fn delete(&self, key: &str) -> Result<bool, String>;
    /// Remaining time-to-live; `None` when the key is absent or has no expiry
    async fn ttl(&self, key: &str) -> Result<Option<Duration>, String>;
}

/// Trait for the outbound SMS gateway
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send a text message, returning the provider's delivery identifier
    async fn send(&self, phone: &str, message: &str) -> Result<String, String>;
}
