//! Background "check indefinitely" loop.
//!
//! A named worker thread sleeps one interval, then runs a check cycle, until
//! either a cycle confirms Christmas or the [`CancellationSignal`] is set.
//! Cancellation is cooperative: it is observed during the sleep (immediately)
//! or before the next cycle, never in the middle of one.
//!
//! ## Usage
//!
//! ```ignore
//! let watch = Watch::spawn(source, reporter, Duration::from_secs(1))?;
//! // block on user input ...
//! let report = watch.stop()?; // cancel + join
//! ```

use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cancel::CancellationSignal;
use crate::cycle::{self, CheckOutcome};
use crate::date::DateSource;
use crate::error::{CoreError, Result};
use crate::events::{CheckEvent, Reporter};
use crate::matcher::ChristmasMatcher;

pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

/// How a watch ended.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WatchReport {
    /// Completed check cycles.
    pub cycles: u64,
    /// Outcome of the last cycle, `None` if cancelled before the first.
    pub last_outcome: Option<CheckOutcome>,
}

impl WatchReport {
    pub fn confirmed(&self) -> bool {
        self.last_outcome.is_some_and(|o| o.is_christmas())
    }
}

/// Handle to the running worker. Dropping it without [`Watch::stop`] or
/// [`Watch::join`] detaches the thread.
#[derive(Debug)]
pub struct Watch {
    signal: Arc<CancellationSignal>,
    handle: JoinHandle<WatchReport>,
}

impl Watch {
    pub fn spawn(
        source: Arc<dyn DateSource>,
        reporter: Arc<dyn Reporter>,
        interval: Duration,
    ) -> Result<Self> {
        let signal = Arc::new(CancellationSignal::new());
        let interval_ms = interval.as_millis() as u64;
        let handle = std::thread::Builder::new()
            .name("yuletide-watch".to_string())
            .spawn({
                let signal = Arc::clone(&signal);
                let reporter = Arc::clone(&reporter);
                move || watch_loop(&*source, &*reporter, &signal, interval)
            })
            .map_err(|e| CoreError::Watch(format!("failed to spawn watch thread: {e}")))?;
        // The worker sleeps a full interval before its first report.
        reporter.report(&CheckEvent::WatchStarted {
            interval_ms,
            at: Utc::now(),
        });
        tracing::info!(interval_ms, "indefinite checking started");
        Ok(Self { signal, handle })
    }

    pub fn cancel(&self) {
        self.signal.cancel();
    }

    /// True once the worker has exited on its own or after cancellation.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the worker to exit.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Watch`] if the worker panicked.
    pub fn join(self) -> Result<WatchReport> {
        self.handle
            .join()
            .map_err(|_| CoreError::Watch("watch thread panicked".to_string()))
    }

    /// Cancel and wait for the worker to acknowledge.
    pub fn stop(self) -> Result<WatchReport> {
        self.cancel();
        let report = self.join()?;
        tracing::info!(cycles = report.cycles, "indefinite checking stopped");
        Ok(report)
    }
}

fn watch_loop(
    source: &dyn DateSource,
    reporter: &dyn Reporter,
    signal: &CancellationSignal,
    interval: Duration,
) -> WatchReport {
    tracing::debug!("indefinite checking loop started");
    let matcher = ChristmasMatcher::new();
    let mut report = WatchReport {
        cycles: 0,
        last_outcome: None,
    };
    loop {
        if signal.sleep(interval) {
            tracing::debug!(cycles = report.cycles, "cancellation observed");
            break;
        }
        let outcome = cycle::check_once(source, &matcher, reporter);
        report.cycles += 1;
        report.last_outcome = Some(outcome);
        if outcome.is_christmas() {
            break;
        }
        tracing::debug!("not Christmas yet, continuing loop");
    }
    reporter.report(&CheckEvent::WatchStopped {
        cycles: report.cycles,
        confirmed: report.confirmed(),
        at: Utc::now(),
    });
    tracing::debug!("indefinite checking loop finished");
    report
}
