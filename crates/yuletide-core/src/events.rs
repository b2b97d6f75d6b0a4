use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::date::NormalizedDate;
use crate::progress::ProgressEstimate;
use crate::session::{MenuChoice, SessionEnd};

/// Every observable step of a check session produces an Event.
/// Reporters render them; tests record them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CheckEvent {
    CycleStarted {
        at: DateTime<Utc>,
    },
    /// The date source failed; the cycle counts as "not Christmas".
    DateUnavailable {
        reason: String,
        at: DateTime<Utc>,
    },
    ChristmasConfirmed {
        date: NormalizedDate,
        at: DateTime<Utc>,
    },
    NotYet {
        date: NormalizedDate,
        estimate: ProgressEstimate,
        at: DateTime<Utc>,
    },
    /// The menu rejected a token.
    InvalidChoice {
        input: String,
        attempt: u32,
        expected: Vec<String>,
        at: DateTime<Utc>,
    },
    /// Too many invalid tokens; the fallback was taken without prompting.
    ChoiceForced {
        choice: MenuChoice,
        at: DateTime<Utc>,
    },
    WatchStarted {
        interval_ms: u64,
        at: DateTime<Utc>,
    },
    /// Background loop finished; `confirmed` is false when it was cancelled.
    WatchStopped {
        cycles: u64,
        confirmed: bool,
        at: DateTime<Utc>,
    },
    SessionEnded {
        end: SessionEnd,
        at: DateTime<Utc>,
    },
    /// Unexpected failure inside the session loop.
    SessionAborted {
        reason: String,
        at: DateTime<Utc>,
    },
}

/// Sink for session events (console output and diagnostics).
///
/// Shared between the controller and the background watch, hence `Sync`.
pub trait Reporter: Send + Sync {
    fn report(&self, event: &CheckEvent);
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: &CheckEvent) {}
}
