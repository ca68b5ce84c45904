//! Unified error type for the common helpers.
//!
//! Every helper that can reject its input returns this type, so callers can
//! match on the failure instead of receiving a misleading default.

use thiserror::Error;

/// Error returned by helpers that reject malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommonError {
    /// A reduction (min, max, average) was asked to reduce nothing
    #[error("Empty input: {0} requires at least one element")]
    EmptyInput(&'static str),

    /// Chunk size must be at least one
    #[error("Invalid chunk size: {0}")]
    InvalidChunkSize(usize),

    /// An argument is outside the range the helper accepts
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Text could not be parsed as a date or instant
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Value cannot be represented by the operation (e.g. not JSON-safe)
    #[error("Unsupported value: {0}")]
    Unsupported(String),

    /// Date arithmetic left the representable range
    #[error("Out of range: {0}")]
    OutOfRange(String),
}

impl CommonError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create an invalid date error
    pub fn invalid_date(msg: impl Into<String>) -> Self {
        Self::InvalidDate(msg.into())
    }

    /// Creates an unsupported value error.
    ///
    /// Use this when a value is well-formed Rust but cannot pass through the
    /// operation, for example a non-finite float handed to `deep_clone` or a
    /// nested object handed to `invert`.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create an out of range error
    pub fn out_of_range(msg: impl Into<String>) -> Self {
        Self::OutOfRange(msg.into())
    }
}
