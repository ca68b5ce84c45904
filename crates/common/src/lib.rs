//! Common utility functions shared by every Snipkit crate.
//!
//! This crate provides pure helpers grouped by topic. None of them share
//! state or depend on each other.
//!
//! # Design Principles
//!
//! - **Pure functions only** - no I/O; time and randomness come through ports
//! - **Loud failures** - malformed input returns [`CommonError`], never a sentinel
//! - **WASM compatible** - all code must work in both native and WASM targets

pub mod calendar;
pub mod error;
pub mod mapping;
pub mod numeric;
pub mod ports;
pub mod sequence;
pub mod text;
pub mod truthy;

pub use error::CommonError;
pub use mapping::JsonMap;
pub use ports::{ClockPort, RandomPort, SystemClock, SystemRandom};
pub use sequence::{AsF64, Nested};
pub use text::TextExt;
pub use truthy::Truthy;

// Re-export commonly used functions at crate root for convenience
pub use calendar::{days_between, format_date, parse_instant, Locale};
pub use numeric::{clamp, format_bytes, generate_uuid, random_int};
pub use text::{escape_html, slugify, unescape_html};
