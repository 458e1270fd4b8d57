//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `cache` - Redis connection configuration
//! - `otp` - OTP lifecycle policy (code TTL, lockout TTL, trial ceiling)
//! - `server` - HTTP server configuration

pub mod cache;
pub mod otp;
pub mod server;

use serde::{Deserialize, Serialize};

pub use cache::CacheConfig;
pub use otp::OtpConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Redis cache configuration
    pub cache: CacheConfig,

    /// OTP policy configuration
    pub otp: OtpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            otp: OtpConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            cache: CacheConfig::from_env(),
            otp: OtpConfig::from_env(),
        }
    }
}
