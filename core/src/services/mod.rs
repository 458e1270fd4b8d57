//! Core service implementations

pub mod otp;
