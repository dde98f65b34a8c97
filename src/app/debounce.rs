//! Trailing-edge debounce timer.
//!
//! [`DebounceGate::schedule`] arms a timer for a task. Scheduling again before the
//! window passes supersedes the pending task, so a burst of calls collapses into one
//! invocation of the most recent task, one window after the last call.
//!
//! A task whose window has passed is no longer pending: it runs to completion even
//! if something is scheduled while it is running.

use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Default quiet window between the last filter edit and the fetch it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Default)]
struct Pending {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

/// Timer-based gate holding at most one pending task.
///
/// Cloning yields a handle to the same gate. Requires a tokio runtime.
#[derive(Debug, Clone)]
pub struct DebounceGate {
    window: Duration,
    pending: Arc<Mutex<Pending>>,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl DebounceGate {
    #[must_use]
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: Arc::new(Mutex::new(Pending::default())),
        }
    }

    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    fn lock(pending: &Mutex<Pending>) -> MutexGuard<'_, Pending> {
        pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs `task` once the window passes without another call to `schedule`.
    ///
    /// Any task still waiting out its window is dropped.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let window = self.window;
        let shared = Arc::clone(&self.pending);

        let mut pending = Self::lock(&self.pending);
        pending.generation += 1;
        let generation = pending.generation;
        if let Some(previous) = pending.handle.take() {
            tracing::trace!(generation, "superseding pending debounced task");
            previous.abort();
        }

        pending.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            {
                let mut pending = Self::lock(&shared);
                if pending.generation != generation {
                    return;
                }
                pending.handle = None;
            }
            tracing::debug!(generation, "debounce window elapsed");
            task.await;
        }));
    }

    /// Drops the pending task, if any. Returns whether one was pending.
    pub fn cancel_pending(&self) -> bool {
        let mut pending = Self::lock(&self.pending);
        pending.generation += 1;
        pending.handle.take().is_some_and(|handle| {
            handle.abort();
            true
        })
    }

    /// Whether a task is still waiting out its window.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        Self::lock(&self.pending).handle.is_some()
    }
}
