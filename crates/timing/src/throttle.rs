//! Leading-edge throttle: at most one invocation per cooldown, extra calls
//! are dropped rather than queued.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

/// Throttled wrapper around a callback.
pub struct Throttle<A> {
    callback: Box<dyn Fn(A) + Send + Sync>,
    cooldown: Duration,
    last_fired: Mutex<Option<Instant>>,
}

impl<A> Throttle<A> {
    pub fn new<F>(cooldown: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
            cooldown,
            last_fired: Mutex::new(None),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Invokes the callback unless a previous invocation is still cooling
    /// down. Returns whether the callback ran.
    pub fn call(&self, arg: A) -> bool {
        let now = Instant::now();
        {
            let mut last_fired = self.lock_last_fired();
            if let Some(fired_at) = *last_fired {
                if now.duration_since(fired_at) < self.cooldown {
                    tracing::trace!(
                        cooldown_ms = self.cooldown.as_millis() as u64,
                        "Throttled call dropped"
                    );
                    return false;
                }
            }
            *last_fired = Some(now);
        }

        // Lock released so the callback may call back into the throttle
        (self.callback)(arg);
        true
    }

    /// Ends the current cooldown so the next call fires immediately.
    pub fn reset(&self) {
        *self.lock_last_fired() = None;
    }

    pub fn is_cooling_down(&self) -> bool {
        self.lock_last_fired()
            .is_some_and(|fired_at| fired_at.elapsed() < self.cooldown)
    }

    fn lock_last_fired(&self) -> MutexGuard<'_, Option<Instant>> {
        self.last_fired.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
