//! OTP lifecycle service
//!
//! This module implements the full OTP state machine for a phone number:
//! - code generation and dispatch through an SMS gateway
//! - trial accounting against a time-expiring key-value store
//! - temporary lockout once trials are exhausted
//!
//! The store and gateway are injected behind traits so the controller can be
//! exercised against in-memory fakes.

mod keys;
mod lockout;
mod outcome;
mod service;
mod traits;

pub mod mock;

#[cfg(test)]
mod tests;

pub use keys::{code_key, lock_key, trials_key};
pub use lockout::{LockStatus, LockoutPolicy, NO_LOCK_TTL_MINUTES};
pub use outcome::Outcome;
pub use service::{generate_code, OtpService, CODE_LENGTH};
pub use traits::{OtpStore, SmsGateway};
