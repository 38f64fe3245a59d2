//! Validation error types

use thiserror::Error;

/// Client-fault error raised before any store interaction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Required field absent or blank
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// Numeric field below zero
    #[error("{field} must not be negative")]
    Negative { field: &'static str },

    /// Integer field below its lower bound
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: i64 },

    /// Derived value not representable as a finite number
    #[error("{field} is too large")]
    TooLarge { field: &'static str },

    /// String doesn't match required format
    #[error("{field}: {reason}")]
    InvalidFormat {
        field: &'static str,
        reason: &'static str,
    },

    /// Invalid enum variant
    #[error("invalid {field} value: '{value}'")]
    InvalidVariant { field: &'static str, value: String },

    /// Request body could not be decoded at all
    #[error("malformed request body: {reason}")]
    MalformedBody { reason: String },
}
