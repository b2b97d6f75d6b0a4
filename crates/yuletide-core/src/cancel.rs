//! Single-shot cancellation flag shared with the background watch.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Set once, never cleared. Setting it wakes any thread sleeping in
/// [`CancellationSignal::sleep`].
#[derive(Debug, Default)]
pub struct CancellationSignal {
    cancelled: Mutex<bool>,
    wake: Condvar,
}

impl CancellationSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        let mut cancelled = self.lock();
        *cancelled = true;
        self.wake.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.lock()
    }

    /// Sleep for `duration` unless cancelled first.
    ///
    /// Returns `true` if the signal is set when the call returns.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut cancelled = self.lock();
        while !*cancelled {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            // Spurious wakeups loop back with the remaining time.
            cancelled = self
                .wake
                .wait_timeout(cancelled, deadline - now)
                .unwrap_or_else(PoisonError::into_inner)
                .0;
        }
        *cancelled
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        // A bool cannot be left half-written.
        self.cancelled.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn starts_clear_and_stays_set() {
        let signal = CancellationSignal::new();
        assert!(!signal.is_cancelled());
        signal.cancel();
        assert!(signal.is_cancelled());
        signal.cancel();
        assert!(signal.is_cancelled());
    }

    #[test]
    fn sleep_runs_full_interval_when_not_cancelled() {
        let signal = CancellationSignal::new();
        let started = Instant::now();
        assert!(!signal.sleep(Duration::from_millis(30)));
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn sleep_returns_immediately_when_already_cancelled() {
        let signal = CancellationSignal::new();
        signal.cancel();
        let started = Instant::now();
        assert!(signal.sleep(Duration::from_secs(10)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn cancel_wakes_a_sleeping_thread() {
        let signal = Arc::new(CancellationSignal::new());
        let sleeper = {
            let signal = Arc::clone(&signal);
            std::thread::spawn(move || {
                let started = Instant::now();
                let cancelled = signal.sleep(Duration::from_secs(10));
                (cancelled, started.elapsed())
            })
        };
        std::thread::sleep(Duration::from_millis(20));
        signal.cancel();
        let (cancelled, elapsed) = sleeper.join().unwrap();
        assert!(cancelled);
        assert!(elapsed < Duration::from_secs(5));
    }
}
