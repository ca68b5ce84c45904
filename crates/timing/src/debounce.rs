//! Trailing-edge debounce.
//!
//! Each call cancels the pending invocation and schedules a new one, so the
//! callback runs once, with the last argument, after the window passes with
//! no further calls.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::TimingError;

type Callback<A> = Arc<dyn Fn(A) + Send + Sync>;

/// Debounced wrapper around a callback.
///
/// Dropping the debouncer cancels any pending invocation.
pub struct Debouncer<A> {
    callback: Callback<A>,
    window: Duration,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A: Send + 'static> Debouncer<A> {
    /// Wraps `callback` with a debounce `window`.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError::NoRuntime`] when called outside a tokio runtime.
    pub fn new<F>(window: Duration, callback: F) -> Result<Self, TimingError>
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| TimingError::NoRuntime)?;
        Ok(Self {
            callback: Arc::new(callback),
            window,
            runtime,
            pending: Mutex::new(None),
        })
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedules `arg` for delivery after the window, replacing any pending call.
    pub fn call(&self, arg: A) {
        let callback = Arc::clone(&self.callback);
        let window = self.window;

        let mut pending = self.lock_pending();
        if let Some(previous) = pending.take() {
            previous.abort();
            tracing::trace!(window_ms = window.as_millis() as u64, "Debounce rescheduled");
        }
        *pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(window).await;
            callback(arg);
        }));
    }

    /// Cancels the pending invocation. Returns true if one was waiting.
    pub fn cancel(&self) -> bool {
        match self.lock_pending().take() {
            Some(handle) => {
                let was_waiting = !handle.is_finished();
                handle.abort();
                was_waiting
            }
            None => false,
        }
    }

    /// True while an invocation is scheduled but has not run yet.
    pub fn is_pending(&self) -> bool {
        self.lock_pending()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    fn lock_pending(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
