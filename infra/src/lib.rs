//! # Infrastructure Layer
//!
//! Concrete implementations of the core seams:
//! - **Cache**: Redis-backed key-value store with TTL support
//! - **SMS**: Twilio delivery and a console mock for development
//!
//! ## Features
//!
//! - `twilio-sms`: Enable the Twilio SMS gateway (default)

/// SMS gateway module - external SMS providers
pub mod sms;

/// Cache module - Redis client and the store adapter
pub mod cache;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
