//! Timer-based helpers on top of tokio.
//!
//! Everything here suspends through tokio timers; nothing blocks a thread.
//! The debouncer and throttle own their timer state, so each wrapped
//! callback is independent of every other.

pub mod debounce;
pub mod delay;
pub mod error;
pub mod poll;
pub mod throttle;

pub use debounce::Debouncer;
pub use delay::{delay, delay_ms};
pub use error::TimingError;
pub use poll::{poll_until, poll_until_timeout, wait_until, DEFAULT_POLL_INTERVAL};
pub use throttle::Throttle;
