//! Polling waits.

use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::error::TimingError;

/// Interval used by [`wait_until`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Shortest interval accepted; tokio rejects a zero period.
const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Evaluates `condition` once per `interval` until it returns true.
///
/// The first evaluation happens one interval after the call. There is no
/// timeout: if the condition never holds this never resolves. Use
/// [`poll_until_timeout`] to bound the wait.
pub async fn poll_until<F>(mut condition: F, interval: Duration)
where
    F: FnMut() -> bool,
{
    let period = interval.max(MIN_POLL_INTERVAL);
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut checks: u64 = 0;
    loop {
        ticker.tick().await;
        checks += 1;
        if condition() {
            tracing::debug!(checks, "Poll condition met");
            return;
        }
    }
}

/// [`poll_until`] with [`DEFAULT_POLL_INTERVAL`].
pub async fn wait_until<F>(condition: F)
where
    F: FnMut() -> bool,
{
    poll_until(condition, DEFAULT_POLL_INTERVAL).await;
}

/// [`poll_until`] that gives up after `timeout`.
///
/// # Errors
///
/// Returns [`TimingError::TimedOut`] if the condition has not held by then.
pub async fn poll_until_timeout<F>(
    condition: F,
    interval: Duration,
    timeout: Duration,
) -> Result<(), TimingError>
where
    F: FnMut() -> bool,
{
    tokio::time::timeout(timeout, poll_until(condition, interval))
        .await
        .map_err(|_| {
            tracing::warn!(timeout_ms = timeout.as_millis() as u64, "Poll timed out");
            TimingError::TimedOut(timeout)
        })
}
