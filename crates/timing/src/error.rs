use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimingError {
    /// Helper needs a tokio runtime but was created outside one
    #[error("No tokio runtime available")]
    NoRuntime,

    #[error("Condition not met within {}ms", .0.as_millis())]
    TimedOut(Duration),
}
