//! Single-fire cancellable timers.
//!
//! Reservation expiry and other deferred actions are modeled as an armed
//! timer whose firing and cancellation are mutually exclusive: exactly one of
//! the two ever claims the guard, so the deferred action runs at most once.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Abstraction for spawning task execution on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Handle returned by [`arm`].
///
/// Dropping the handle does not cancel the timer; call [`TimerHandle::cancel`]
/// to prevent the deferred action from running.
#[derive(Debug)]
pub struct TimerHandle {
    armed: Arc<AtomicBool>,
}

impl TimerHandle {
    /// Cancel the timer. Returns true when cancellation won the guard, false
    /// when the timer already fired or was already cancelled.
    pub fn cancel(&self) -> bool {
        self.armed.swap(false, Ordering::AcqRel)
    }

    /// True while neither firing nor cancellation has claimed the guard.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.load(Ordering::Acquire)
    }
}

/// Arm a single-fire timer: after `delay`, `on_fire` runs unless the handle
/// was cancelled first.
///
/// The spawned wait itself is not aborted by cancellation; it wakes, loses the
/// guard, and exits without running the action.
pub fn arm<S, F>(spawner: &S, delay: Duration, on_fire: F) -> TimerHandle
where
    S: Spawn,
    F: Future<Output = ()> + Send + 'static,
{
    let armed = Arc::new(AtomicBool::new(true));
    let claim = Arc::clone(&armed);
    spawner.spawn(async move {
        tokio::time::sleep(delay).await;
        if claim.swap(false, Ordering::AcqRel) {
            on_fire.await;
        }
    });
    TimerHandle { armed }
}
