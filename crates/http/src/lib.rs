//! Thin JSON-over-HTTP helpers built on reqwest.
//!
//! Failures are typed ([`HttpError`]) so callers can tell a timeout from a
//! transport failure or a non-success status. Each failure is also logged
//! through `tracing`.

pub mod client;
pub mod config;
pub mod error;

pub use client::JsonClient;
pub use config::HttpConfig;
pub use error::HttpError;
