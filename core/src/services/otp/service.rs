//! OTP lifecycle controller

use std::sync::Arc;
use std::time::Duration;

use constant_time_eq::constant_time_eq;
use rand::{rngs::OsRng, RngCore};

use otp_shared::config::OtpConfig;
use otp_shared::utils::phone::mask_phone_number;

use crate::errors::{OtpError, OtpResult};

use super::keys::{code_key, trials_key};
use super::lockout::LockoutPolicy;
use super::outcome::Outcome;
use super::traits::{OtpStore, SmsGateway};

/// Number of digits in a generated OTP code
pub const CODE_LENGTH: usize = 6;

/// Which way a verification attempt failed
enum VerifyFailure {
    /// No code on file for the number
    Expired,
    /// A code is on file but the submitted one does not match
    Mismatch,
}

/// Controller orchestrating code generation, trial accounting, and
/// verification against the store
///
/// Stateless between calls; every piece of state lives in the store so any
/// number of controller instances can serve the same numbers concurrently.
pub struct OtpService<S: OtpStore, G: SmsGateway> {
    store: Arc<S>,
    gateway: Arc<G>,
    lockout: LockoutPolicy<S>,
    config: OtpConfig,
}

impl<S: OtpStore, G: SmsGateway> OtpService<S, G> {
    /// Create a new controller over the given store and gateway
    pub fn new(store: Arc<S>, gateway: Arc<G>, config: OtpConfig) -> Self {
        let lockout = LockoutPolicy::new(Arc::clone(&store), &config);
        Self {
            store,
            gateway,
            lockout,
            config,
        }
    }

    /// The lockout policy this controller consults
    pub fn lockout(&self) -> &LockoutPolicy<S> {
        &self.lockout
    }

    /// Issue a fresh OTP code to a phone number
    ///
    /// A new send always supersedes an in-flight code. The trials counter is
    /// seeded to the configured maximum only when absent; resends while a
    /// counter exists leave it untouched, so exhaustion accumulates across
    /// sends within the same window.
    pub async fn request_otp(&self, phone: &str) -> OtpResult<Outcome> {
        let status = self.lockout.is_locked(phone).await?;
        if status.locked {
            tracing::info!(
                phone = mask_phone_number(phone),
                ttl_minutes = status.ttl_minutes,
                event = "otp_send_blocked",
                "Phone number is locked"
            );
            return Ok(Outcome::Locked {
                ttl_minutes: status.ttl_minutes,
            });
        }

        let code = generate_code();
        self.store
            .set_with_ttl(
                &code_key(phone),
                &code,
                Duration::from_secs(self.config.code_ttl_seconds),
            )
            .await
            .map_err(OtpError::cache)?;

        // Delivery failure aborts here; the stored code is deliberately left
        // in place rather than rolled back.
        let message = format!("OTP message is {}", code);
        let message_id = self
            .gateway
            .send(phone, &message)
            .await
            .map_err(OtpError::delivery)?;

        tracing::info!(
            phone = mask_phone_number(phone),
            message_id = message_id,
            event = "otp_sent",
            "Dispatched OTP code"
        );

        let trials_left = match self.trials_left(phone).await? {
            Some(trials) => trials,
            None => self.seed_trials(phone).await?,
        };

        Ok(Outcome::Sent { trials_left })
    }

    /// Verify a submitted code for a phone number
    pub async fn verify_otp(&self, phone: &str, submitted: &str) -> OtpResult<Outcome> {
        let status = self.lockout.is_locked(phone).await?;
        if status.locked {
            tracing::info!(
                phone = mask_phone_number(phone),
                ttl_minutes = status.ttl_minutes,
                event = "otp_verify_blocked",
                "Phone number is locked"
            );
            return Ok(Outcome::Locked {
                ttl_minutes: status.ttl_minutes,
            });
        }

        let cached = self
            .store
            .get(&code_key(phone))
            .await
            .map_err(OtpError::cache)?;

        match cached {
            // Absent means expired; the store does not distinguish a code
            // that timed out from one that was never sent.
            None => self.handle_failed_attempt(phone, VerifyFailure::Expired).await,
            Some(cached) if !codes_match(&cached, submitted) => {
                self.handle_failed_attempt(phone, VerifyFailure::Mismatch)
                    .await
            }
            Some(_) => {
                self.cleanup(phone).await?;
                tracing::info!(
                    phone = mask_phone_number(phone),
                    event = "otp_verified",
                    "Phone number successfully verified"
                );
                Ok(Outcome::Verified {
                    phone: phone.to_string(),
                })
            }
        }
    }

    /// Delete the code and trials entries for a number
    ///
    /// Deleting an absent key is not an error, so invoking this on a number
    /// with no entries succeeds. A failure between the two deletes leaves the
    /// trials entry behind; re-invocation is idempotent at the key level.
    pub async fn cleanup(&self, phone: &str) -> OtpResult<()> {
        self.store
            .delete(&code_key(phone))
            .await
            .map_err(OtpError::cache)?;
        self.store
            .delete(&trials_key(phone))
            .await
            .map_err(OtpError::cache)?;
        Ok(())
    }

    /// Account for a failed verification attempt
    ///
    /// At exactly one remaining trial the attempt converts into a lockout
    /// instead of a decrement, so the counter never reaches zero through this
    /// path. An absent counter is re-seeded to the maximum first, keeping the
    /// counter inside [0, max] even when verify races a cleanup.
    async fn handle_failed_attempt(
        &self,
        phone: &str,
        failure: VerifyFailure,
    ) -> OtpResult<Outcome> {
        let trials = match self.trials_left(phone).await? {
            Some(trials) => trials,
            None => self.seed_trials(phone).await?,
        };

        // Below 1 only when a concurrent attempt won the decrement race;
        // treat as exhausted either way.
        if trials <= 1 {
            self.cleanup(phone).await?;
            self.lockout.set_locked(phone).await?;

            let ttl_minutes = self.config.lock_ttl_minutes as i64;
            tracing::warn!(
                phone = mask_phone_number(phone),
                event = "otp_trials_exhausted",
                "Max trial limit reached, phone number locked"
            );

            return Ok(match failure {
                VerifyFailure::Expired => Outcome::ExpiredAndLocked { ttl_minutes },
                VerifyFailure::Mismatch => Outcome::MismatchAndLocked { ttl_minutes },
            });
        }

        let trials_left = self
            .store
            .decrement(&trials_key(phone))
            .await
            .map_err(OtpError::cache)?;

        tracing::info!(
            phone = mask_phone_number(phone),
            trials_left = trials_left,
            event = "otp_attempt_failed",
            "Verification attempt failed"
        );

        Ok(match failure {
            VerifyFailure::Expired => Outcome::Expired { trials_left },
            VerifyFailure::Mismatch => Outcome::Mismatch { trials_left },
        })
    }

    /// Read the trials counter; `None` when it has never been seeded
    async fn trials_left(&self, phone: &str) -> OtpResult<Option<i64>> {
        let value = self
            .store
            .get(&trials_key(phone))
            .await
            .map_err(OtpError::cache)?;

        match value {
            None => Ok(None),
            Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| OtpError::Internal {
                message: format!("Trials counter holds a non-integer value: {raw}"),
            }),
        }
    }

    /// Initialize the trials counter to the configured maximum
    ///
    /// Stored without TTL: the counter persists until explicit cleanup.
    async fn seed_trials(&self, phone: &str) -> OtpResult<i64> {
        let max = self.config.max_trials;
        self.store
            .set(&trials_key(phone), &max.to_string())
            .await
            .map_err(OtpError::cache)?;

        tracing::debug!(
            phone = mask_phone_number(phone),
            max_trials = max,
            "Seeded trials counter"
        );
        Ok(max)
    }
}

/// Generate a fresh OTP code from the OS CSPRNG
///
/// Each digit is drawn independently. Bytes of 250 and above are rejected
/// before the modulo so all ten digits stay equally likely.
pub fn generate_code() -> String {
    let mut rng = OsRng;
    let mut code = String::with_capacity(CODE_LENGTH);
    let mut buf = [0u8; 16];

    while code.len() < CODE_LENGTH {
        rng.fill_bytes(&mut buf);
        for &byte in buf.iter() {
            if code.len() == CODE_LENGTH {
                break;
            }
            if byte < 250 {
                code.push(char::from(b'0' + byte % 10));
            }
        }
    }
    code
}

/// Constant-time comparison of a cached and a submitted code
fn codes_match(cached: &str, submitted: &str) -> bool {
    if cached.len() != submitted.len() {
        return false;
    }
    constant_time_eq(cached.as_bytes(), submitted.as_bytes())
}
