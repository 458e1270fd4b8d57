//! Lockout policy
//!
//! A phone number with an active lock flag may make no OTP requests at all.
//! The flag is created with the configured lockout TTL when trials are
//! exhausted and released only by store expiry; there is no unlock operation.

use std::sync::Arc;
use std::time::Duration;

use otp_shared::config::OtpConfig;
use otp_shared::utils::phone::mask_phone_number;

use crate::errors::{OtpError, OtpResult};

use super::keys::lock_key;
use super::traits::OtpStore;

/// Stored value marking a number as locked
const LOCK_VALUE: &str = "1";

/// TTL reported when no lock record exists for a number
pub const NO_LOCK_TTL_MINUTES: i64 = -2;

/// Snapshot of a number's lock state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockStatus {
    /// Whether the number is currently locked
    pub locked: bool,
    /// Whole minutes until the lock expires; [`NO_LOCK_TTL_MINUTES`] when no
    /// lock record exists
    pub ttl_minutes: i64,
}

impl LockStatus {
    /// Status for a number with no lock record on file
    pub const NOT_LOCKED: LockStatus = LockStatus {
        locked: false,
        ttl_minutes: NO_LOCK_TTL_MINUTES,
    };
}

/// Read/write access to the per-number lockout flag
pub struct LockoutPolicy<S: OtpStore> {
    store: Arc<S>,
    lock_ttl: Duration,
}

impl<S: OtpStore> LockoutPolicy<S> {
    /// Create a new lockout policy over the given store
    pub fn new(store: Arc<S>, config: &OtpConfig) -> Self {
        Self {
            store,
            lock_ttl: Duration::from_secs(config.lock_ttl_seconds()),
        }
    }

    /// Check whether a number is locked, without mutating any state
    ///
    /// Returns [`LockStatus::NOT_LOCKED`] when no flag entry exists. When a
    /// flag is present, the remaining TTL is truncated to whole minutes.
    pub async fn is_locked(&self, phone: &str) -> OtpResult<LockStatus> {
        let key = lock_key(phone);

        let value = self.store.get(&key).await.map_err(OtpError::cache)?;
        let Some(value) = value else {
            return Ok(LockStatus::NOT_LOCKED);
        };

        let ttl = self.store.ttl(&key).await.map_err(OtpError::cache)?;
        let ttl_minutes = ttl.map(|d| (d.as_secs() / 60) as i64).unwrap_or(0);

        Ok(LockStatus {
            locked: value == LOCK_VALUE,
            ttl_minutes,
        })
    }

    /// Lock a number for the configured lockout window
    pub async fn set_locked(&self, phone: &str) -> OtpResult<()> {
        tracing::warn!(
            phone = mask_phone_number(phone),
            ttl_secs = self.lock_ttl.as_secs(),
            "Locking phone number for OTP requests"
        );

        self.store
            .set_with_ttl(&lock_key(phone), LOCK_VALUE, self.lock_ttl)
            .await
            .map_err(OtpError::cache)
    }
}
