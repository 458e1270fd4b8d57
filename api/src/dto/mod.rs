//! Request and response data transfer objects

pub mod otp;

pub use otp::{OtpUser, SendOtpRequest, TimeData, TrialsData, VerifyOtpRequest};
