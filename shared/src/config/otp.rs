//! OTP policy configuration
//!
//! Three knobs govern the OTP lifecycle: how long a code stays valid, how
//! long an exhausted number stays locked out, and how many verification
//! trials a number gets before lockout.

use serde::{Deserialize, Serialize};

/// OTP lifecycle policy configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OtpConfig {
    /// OTP code time-to-live in seconds
    #[serde(default = "default_code_ttl_seconds")]
    pub code_ttl_seconds: u64,

    /// Lockout duration in minutes once trials are exhausted
    #[serde(default = "default_lock_ttl_minutes")]
    pub lock_ttl_minutes: u64,

    /// Maximum verification trials before lockout
    #[serde(default = "default_max_trials")]
    pub max_trials: i64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: default_code_ttl_seconds(),
            lock_ttl_minutes: default_lock_ttl_minutes(),
            max_trials: default_max_trials(),
        }
    }
}

impl OtpConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let code_ttl_seconds = std::env::var("OTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_code_ttl_seconds);
        let lock_ttl_minutes = std::env::var("OTP_LOCK_TIMEOUT_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_lock_ttl_minutes);
        let max_trials = std::env::var("OTP_MAX_TRIALS")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n| n >= 1)
            .unwrap_or_else(default_max_trials);

        Self {
            code_ttl_seconds,
            lock_ttl_minutes,
            max_trials,
        }
    }

    /// Lock TTL as a number of seconds, for the cache layer
    pub fn lock_ttl_seconds(&self) -> u64 {
        self.lock_ttl_minutes * 60
    }
}

fn default_code_ttl_seconds() -> u64 {
    300
}

fn default_lock_ttl_minutes() -> u64 {
    30
}

fn default_max_trials() -> i64 {
    3
}
