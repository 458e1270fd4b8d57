//! Cache module
//!
//! The Redis client handles connection management and raw commands; the
//! adapter exposes it through the core's `OtpStore` seam.

pub mod otp_store;
pub mod redis_client;

pub use otp_store::RedisOtpStore;
pub use redis_client::RedisClient;
