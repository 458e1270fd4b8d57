//! Shared types, configuration, and utilities for the OTP service
//!
//! This crate holds the pieces every other layer depends on:
//! - `config` - environment-driven configuration for the server, cache, and
//!   OTP policy
//! - `types` - the JSON response envelope used by the HTTP surface
//! - `utils` - phone number validation and masking helpers

pub mod config;
pub mod types;
pub mod utils;
