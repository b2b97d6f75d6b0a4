//! One evaluation pass: fetch the date, match it, estimate progress.
//!
//! ## State Transitions
//!
//! ```text
//! Evaluating -> Done(Unknown | NotYet | Confirmed)
//! ```
//!
//! A cycle keeps no memory between runs. Date retrieval failures end the
//! cycle with [`CheckOutcome::Unknown`], which callers treat exactly like
//! "not Christmas yet".

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::date::{DateSource, NormalizedDate};
use crate::events::{CheckEvent, Reporter};
use crate::matcher::ChristmasMatcher;
use crate::progress::{self, ProgressEstimate};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CheckOutcome {
    /// The date could not be retrieved.
    Unknown,
    NotYet {
        date: NormalizedDate,
        estimate: ProgressEstimate,
    },
    Confirmed {
        date: NormalizedDate,
    },
}

impl CheckOutcome {
    pub fn is_christmas(&self) -> bool {
        matches!(self, CheckOutcome::Confirmed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CycleState {
    Evaluating,
    Done(CheckOutcome),
}

/// Borrowed collaborators for one pass.
pub struct CheckCycle<'a> {
    source: &'a dyn DateSource,
    matcher: &'a ChristmasMatcher,
    reporter: &'a dyn Reporter,
    state: CycleState,
}

impl<'a> CheckCycle<'a> {
    pub fn new(
        source: &'a dyn DateSource,
        matcher: &'a ChristmasMatcher,
        reporter: &'a dyn Reporter,
    ) -> Self {
        Self {
            source,
            matcher,
            reporter,
            state: CycleState::Evaluating,
        }
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Drive the machine to `Done` and return the outcome.
    pub fn run(mut self) -> CheckOutcome {
        self.reporter.report(&CheckEvent::CycleStarted { at: Utc::now() });
        loop {
            match self.state {
                CycleState::Evaluating => self.state = CycleState::Done(self.evaluate()),
                CycleState::Done(outcome) => return outcome,
            }
        }
    }

    fn evaluate(&self) -> CheckOutcome {
        let date = match self.source.today() {
            Ok(date) => date,
            Err(e) => {
                tracing::error!(error = %e, "failed to retrieve current date");
                self.reporter.report(&CheckEvent::DateUnavailable {
                    reason: e.to_string(),
                    at: Utc::now(),
                });
                return CheckOutcome::Unknown;
            }
        };

        if self.matcher.matches(Some(&date)) {
            tracing::info!(%date, "match found, it's Christmas");
            self.reporter.report(&CheckEvent::ChristmasConfirmed {
                date,
                at: Utc::now(),
            });
            return CheckOutcome::Confirmed { date };
        }

        let estimate = progress::estimate(&date);
        tracing::info!(%date, days_remaining = estimate.days_remaining, "not Christmas yet");
        self.reporter.report(&CheckEvent::NotYet {
            date,
            estimate,
            at: Utc::now(),
        });
        CheckOutcome::NotYet { date, estimate }
    }
}

/// Run a single cycle with the given collaborators.
pub fn check_once(
    source: &dyn DateSource,
    matcher: &ChristmasMatcher,
    reporter: &dyn Reporter,
) -> CheckOutcome {
    CheckCycle::new(source, matcher, reporter).run()
}
