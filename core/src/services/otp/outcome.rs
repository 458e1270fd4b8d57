//! Outcome enumeration for the OTP lifecycle
//!
//! Every successful controller call resolves to exactly one of these
//! variants; store and gateway failures travel separately as errors.

/// Result of a send or verify request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The number is locked out; minutes until the lock expires
    Locked { ttl_minutes: i64 },

    /// A code was dispatched; verification trials remaining
    Sent { trials_left: i64 },

    /// No code on file at verify time; trials remaining after the attempt
    Expired { trials_left: i64 },

    /// No code on file and this attempt exhausted the trials; lockout minutes
    ExpiredAndLocked { ttl_minutes: i64 },

    /// Submitted code did not match; trials remaining after the attempt
    Mismatch { trials_left: i64 },

    /// Submitted code did not match and trials are exhausted; lockout minutes
    MismatchAndLocked { ttl_minutes: i64 },

    /// Submitted code matched; the phone number is verified
    Verified { phone: String },
}

impl Outcome {
    /// Whether this outcome blocks further OTP activity for the number
    pub fn is_locked(&self) -> bool {
        matches!(
            self,
            Outcome::Locked { .. }
                | Outcome::ExpiredAndLocked { .. }
                | Outcome::MismatchAndLocked { .. }
        )
    }
}
