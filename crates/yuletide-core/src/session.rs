//! Interactive check session.
//!
//! The controller runs a check cycle, and while it is not Christmas asks the
//! user what to do next: check again, check indefinitely in the background,
//! or end. Menu input goes through [`ChoiceReader`], which gives up after too
//! many invalid tokens and takes a fallback instead of prompting forever.
//!
//! ## State Transitions
//!
//! ```text
//! Checking -> (Christmas | Menu)
//! Menu -> Checking            (c)
//! Menu -> Watching -> (Christmas | Checking)   (i, or forced)
//! Menu -> Ended               (e, or end of input)
//! ```

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cycle::{self, CheckOutcome};
use crate::date::DateSource;
use crate::error::{CoreError, Result};
use crate::events::{CheckEvent, Reporter};
use crate::matcher::ChristmasMatcher;
use crate::watch::{Watch, WatchReport, DEFAULT_INTERVAL};

pub const DEFAULT_MAX_INVALID_ATTEMPTS: u32 = 2;
pub const STOP_PROMPT: &str = "Press Enter to stop checking: ";

/// Line-based console input.
pub trait LineSource {
    /// Show `prompt` and read one line. `Ok(None)` means end of input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

impl<T: LineSource + ?Sized> LineSource for &mut T {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }
}

/// Writes prompts to `W` and reads answers from `R`.
#[derive(Debug)]
pub struct PromptedLines<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptedLines<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LineSource for PromptedLines<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// A fixed set of menu tokens.
pub trait Choice: Sized + Copy {
    const PROMPT: &'static str;
    const TOKENS: &'static [&'static str];

    /// `token` is already trimmed and lowercased.
    fn from_token(token: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuChoice {
    CheckAgain,
    Indefinite,
    End,
}

impl Choice for MenuChoice {
    const PROMPT: &'static str = "Check again (c), indefinitely (i), or end (e)? ";
    const TOKENS: &'static [&'static str] = &["c", "i", "e"];

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "c" => Some(MenuChoice::CheckAgain),
            "i" => Some(MenuChoice::Indefinite),
            "e" => Some(MenuChoice::End),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer<C> {
    Chosen(C),
    /// Too many invalid tokens; the fallback was taken.
    Forced(C),
    /// Input ended before a valid token.
    Closed,
}

/// Bounded-retry reader for [`Choice`] menus.
#[derive(Debug, Clone, Copy)]
pub struct ChoiceReader {
    max_invalid_attempts: u32,
}

impl Default for ChoiceReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INVALID_ATTEMPTS)
    }
}

impl ChoiceReader {
    pub fn new(max_invalid_attempts: u32) -> Self {
        Self {
            max_invalid_attempts,
        }
    }

    /// Prompt until a valid token arrives. Once `attempts` exceeds the
    /// threshold, `fallback` is returned without prompting again.
    pub fn ask<C: Choice>(
        &self,
        lines: &mut dyn LineSource,
        reporter: &dyn Reporter,
        attempts: &mut u32,
        fallback: C,
    ) -> io::Result<Answer<C>> {
        *attempts = 0;
        loop {
            let Some(line) = lines.read_line(C::PROMPT)? else {
                return Ok(Answer::Closed);
            };
            let token = line.trim().to_lowercase();
            if let Some(choice) = C::from_token(&token) {
                return Ok(Answer::Chosen(choice));
            }
            *attempts += 1;
            tracing::warn!(input = %line, attempt = *attempts, "invalid menu choice");
            reporter.report(&CheckEvent::InvalidChoice {
                input: line,
                attempt: *attempts,
                expected: C::TOKENS.iter().map(|t| t.to_string()).collect(),
                at: Utc::now(),
            });
            if *attempts > self.max_invalid_attempts {
                return Ok(Answer::Forced(fallback));
            }
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEnd {
    Christmas,
    UserEnded,
    /// An unexpected failure stopped the loop.
    Aborted,
}

impl SessionEnd {
    pub fn exit_code(self) -> i32 {
        match self {
            SessionEnd::Christmas | SessionEnd::UserEnded => 0,
            SessionEnd::Aborted => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub interval: Duration,
    pub max_invalid_attempts: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            max_invalid_attempts: DEFAULT_MAX_INVALID_ATTEMPTS,
        }
    }
}

/// Mutable controller state. Only the controller touches it.
#[derive(Debug, Default)]
pub struct SessionState {
    last_outcome: Option<CheckOutcome>,
    invalid_attempts: u32,
    watch: Option<Watch>,
}

impl SessionState {
    pub fn last_outcome(&self) -> Option<CheckOutcome> {
        self.last_outcome
    }

    pub fn invalid_attempts(&self) -> u32 {
        self.invalid_attempts
    }
}

pub struct Session<L> {
    source: Arc<dyn DateSource>,
    reporter: Arc<dyn Reporter>,
    lines: L,
    matcher: ChristmasMatcher,
    choices: ChoiceReader,
    settings: SessionSettings,
    state: SessionState,
}

impl<L: LineSource> Session<L> {
    pub fn new(
        source: Arc<dyn DateSource>,
        reporter: Arc<dyn Reporter>,
        lines: L,
        settings: SessionSettings,
    ) -> Self {
        Self {
            source,
            reporter,
            lines,
            matcher: ChristmasMatcher::new(),
            choices: ChoiceReader::new(settings.max_invalid_attempts),
            settings,
            state: SessionState::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Run until Christmas, the user ends it, or an unexpected failure.
    pub fn run(&mut self) -> SessionEnd {
        let end = match self.run_loop() {
            Ok(end) => end,
            Err(e) => {
                tracing::error!(error = %e, "unexpected error, ending session");
                self.reporter.report(&CheckEvent::SessionAborted {
                    reason: e.to_string(),
                    at: Utc::now(),
                });
                SessionEnd::Aborted
            }
        };
        if let Some(watch) = self.state.watch.take() {
            if let Err(e) = watch.stop() {
                tracing::error!(error = %e, "failed to stop watch");
            }
        }
        tracing::info!(?end, "session ended");
        self.reporter.report(&CheckEvent::SessionEnded {
            end,
            at: Utc::now(),
        });
        end
    }

    fn run_loop(&mut self) -> Result<SessionEnd> {
        loop {
            if self.check().is_christmas() {
                return Ok(SessionEnd::Christmas);
            }
            match self.next_action()? {
                MenuChoice::CheckAgain => continue,
                MenuChoice::End => return Ok(SessionEnd::UserEnded),
                MenuChoice::Indefinite => {
                    if self.watch_until_stopped()?.confirmed() {
                        return Ok(SessionEnd::Christmas);
                    }
                }
            }
        }
    }

    fn check(&mut self) -> CheckOutcome {
        let outcome = cycle::check_once(&*self.source, &self.matcher, &*self.reporter);
        self.state.last_outcome = Some(outcome);
        outcome
    }

    fn next_action(&mut self) -> Result<MenuChoice> {
        let answer = self.choices.ask(
            &mut self.lines,
            &*self.reporter,
            &mut self.state.invalid_attempts,
            MenuChoice::Indefinite,
        )?;
        Ok(match answer {
            Answer::Chosen(choice) => choice,
            Answer::Forced(choice) => {
                tracing::warn!(
                    attempts = self.state.invalid_attempts,
                    "too many invalid choices, checking indefinitely"
                );
                self.reporter.report(&CheckEvent::ChoiceForced {
                    choice,
                    at: Utc::now(),
                });
                choice
            }
            Answer::Closed => {
                tracing::info!("input closed, ending session");
                MenuChoice::End
            }
        })
    }

    /// Start the background loop, block on the stop prompt, then cancel and
    /// join before returning.
    ///
    /// A confirmation from the worker does not unblock the prompt: the
    /// session ends as Christmas only once a line (or end of input) arrives.
    fn watch_until_stopped(&mut self) -> Result<WatchReport> {
        self.state.watch = Some(Watch::spawn(
            Arc::clone(&self.source),
            Arc::clone(&self.reporter),
            self.settings.interval,
        )?);
        let input = self.lines.read_line(STOP_PROMPT);
        let report = match self.state.watch.take() {
            Some(watch) => watch.stop()?,
            None => return Err(CoreError::Watch("watch handle missing".to_string())),
        };
        input?;
        if report.last_outcome.is_some() {
            self.state.last_outcome = report.last_outcome;
        }
        Ok(report)
    }
}
