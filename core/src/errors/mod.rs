//! Error types for the OTP domain
//!
//! Four categories cover every failure the core can produce. Lockout is not
//! among them: a locked number is a normal outcome, not an error.

use thiserror::Error;

/// Domain error taxonomy
#[derive(Error, Debug)]
pub enum OtpError {
    /// Malformed or missing request data; no state was mutated
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Key-value store communication failure; the flow aborts where it stood
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// Messaging gateway failure; any already-stored code is left in place
    #[error("Delivery error: {message}")]
    Delivery { message: String },

    /// Unexpected internal failure
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl OtpError {
    /// Wrap a store-level failure
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Wrap a gateway-level failure
    pub fn delivery(message: impl Into<String>) -> Self {
        Self::Delivery {
            message: message.into(),
        }
    }
}

/// Result type alias for domain operations
pub type OtpResult<T> = Result<T, OtpError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OtpError::cache("connection refused");
        assert_eq!(err.to_string(), "Cache error: connection refused");

        let err = OtpError::Validation {
            message: "phone number required".to_string(),
        };
        assert!(err.to_string().starts_with("Validation error"));
    }
}
