//! # Yuletide Core Library
//!
//! Core logic for the "is it Christmas yet" checker. The CLI binary is a thin
//! layer over this crate: it wires a date source, a console reporter and
//! stdin into a [`Session`].
//!
//! ## Architecture
//!
//! - **Date**: host date retrieval normalized to `"Mon DD"`
//! - **Matcher**: permissive December 25 recognition over a fixed pattern table
//! - **Progress**: approximate fraction of the year elapsed toward Christmas
//! - **Cycle**: one fetch/match/estimate pass that never fails outward
//! - **Session**: interactive menu plus a cancellable background watch
//!
//! ## Key Components
//!
//! - [`ChristmasMatcher`]: pattern-based date recognition
//! - [`CheckCycle`]: single evaluation state machine
//! - [`Session`]: interaction controller
//! - [`Watch`]: background polling loop
//! - [`Config`]: Application configuration management

pub mod cancel;
pub mod config;
pub mod cycle;
pub mod date;
pub mod error;
pub mod events;
pub mod matcher;
pub mod progress;
pub mod session;
pub mod watch;

pub use cancel::CancellationSignal;
pub use config::{Config, DateSourceKind};
pub use cycle::{check_once, CheckCycle, CheckOutcome, CycleState};
pub use date::{
    ClockDateSource, CommandDateSource, DateSource, FixedDateSource, Month, NormalizedDate,
};
pub use error::{ConfigError, CoreError, DateError};
pub use events::{CheckEvent, NullReporter, Reporter};
pub use matcher::{ChristmasMatcher, PatternSet, CHRISTMAS_PATTERNS};
pub use progress::ProgressEstimate;
pub use session::{
    Answer, Choice, ChoiceReader, LineSource, MenuChoice, PromptedLines, Session, SessionEnd,
    SessionSettings, SessionState,
};
pub use watch::{Watch, WatchReport};
