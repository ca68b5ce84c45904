//! Typed failures for the HTTP helpers.

use std::time::Duration;

use thiserror::Error;

/// Why an HTTP helper failed.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The timer elapsed before a response arrived
    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Connection, DNS, TLS or body transfer failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Server answered with a non-success status
    #[error("HTTP {status}: {reason}")]
    Status { status: u16, reason: String },

    /// Body was not the expected JSON
    #[error("Invalid JSON body: {0}")]
    Decode(String),

    /// Request could not be built (bad URL or body)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl HttpError {
    /// Classifies a reqwest error. `timeout` is the limit that was in force.
    pub(crate) fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else if err.is_builder() {
            Self::InvalidRequest(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    pub(crate) fn status(status: reqwest::StatusCode) -> Self {
        Self::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Check if this error is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }

    /// Status code, if the server answered with a non-success status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
