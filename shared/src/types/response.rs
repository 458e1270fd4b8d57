//! API response envelope types
//!
//! Every endpoint answers with one of two JSON shapes: a success envelope
//! carrying a status code, a human-readable message, and a typed payload, or
//! an error envelope carrying a status code and message only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Success response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse<T> {
    /// HTTP status code echoed in the body
    pub code: u16,

    /// Human-readable outcome message
    pub message: String,

    /// Response payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> SuccessResponse<T> {
    /// Create a success envelope with a payload
    pub fn new(code: u16, message: impl Into<String>, data: T) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Create a success envelope without a payload
    pub fn message_only(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// Error response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code echoed in the body
    pub code: u16,

    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error envelope
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status string
    pub status: String,

    /// Service name
    pub service: String,

    /// Service version
    pub version: String,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,
}
