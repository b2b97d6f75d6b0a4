//! Host date retrieval and normalization.
//!
//! Every date source produces a [`NormalizedDate`]: a month abbreviation and
//! a day of month, displayed as `"Mon DD"`. The day is checked textually
//! (1..=31) and is never validated against a calendar.

use std::fmt;
use std::process::Command;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DateError;

/// Leading `"Mon DD"` of a host date string.
const DATE_PREFIX_PATTERN: &str = r"^(\w{3})\s+(\d{1,2})\b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// 1-based month number.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn from_number(n: u32) -> Option<Self> {
        Self::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    pub fn abbrev(self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Case-insensitive lookup of a three-letter abbreviation.
    pub fn from_abbrev(s: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.abbrev().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbrev())
    }
}

/// Canonical month/day value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NormalizedDate {
    month: Month,
    day: u8,
}

impl NormalizedDate {
    pub fn new(month: Month, day: u32) -> Result<Self, DateError> {
        if !(1..=31).contains(&day) {
            return Err(DateError::InvalidDay(day));
        }
        Ok(Self {
            month,
            day: day as u8,
        })
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        // chrono guarantees month 1..=12 and day 1..=31.
        let month = Month::from_number(date.month()).unwrap_or(Month::Jan);
        Self {
            month,
            day: date.day() as u8,
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day as u32
    }

    /// Extract the leading `"Mon DD"` from raw host output.
    pub fn normalize(raw: &str) -> Result<Self, DateError> {
        let raw = raw.trim();
        let caps = date_prefix()
            .captures(raw)
            .ok_or_else(|| DateError::Unrecognized {
                raw: raw.to_string(),
            })?;
        let month = Month::from_abbrev(&caps[1])
            .ok_or_else(|| DateError::InvalidMonth(caps[1].to_string()))?;
        let day: u32 = caps[2].parse().map_err(|_| DateError::Unrecognized {
            raw: raw.to_string(),
        })?;
        Self::new(month, day)
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:02}", self.month, self.day)
    }
}

impl FromStr for NormalizedDate {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::normalize(s)
    }
}

fn date_prefix() -> &'static Regex {
    static PREFIX: OnceLock<Regex> = OnceLock::new();
    PREFIX.get_or_init(|| Regex::new(DATE_PREFIX_PATTERN).expect("date prefix pattern is valid"))
}

/// Source of the current date.
///
/// Failures never panic past this boundary; callers treat them as
/// "not Christmas".
pub trait DateSource: Send + Sync {
    fn today(&self) -> Result<NormalizedDate, DateError>;
}

impl<F> DateSource for F
where
    F: Fn() -> Result<NormalizedDate, DateError> + Send + Sync,
{
    fn today(&self) -> Result<NormalizedDate, DateError> {
        self()
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockDateSource;

impl DateSource for ClockDateSource {
    fn today(&self) -> Result<NormalizedDate, DateError> {
        Ok(NormalizedDate::from_naive(chrono::Local::now().date_naive()))
    }
}

/// Asks the host shell for the date and normalizes its output.
#[derive(Debug, Clone)]
pub struct CommandDateSource {
    program: String,
    args: Vec<String>,
}

impl CommandDateSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// `date +%b %d` on Unix, `echo %DATE%` on Windows.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::new("cmd", vec!["/C".into(), "echo %DATE%".into()])
        } else {
            Self::new("date", vec!["+%b %d".into()])
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl DateSource for CommandDateSource {
    fn today(&self) -> Result<NormalizedDate, DateError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| DateError::Command {
                command: self.command_line(),
                message: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(DateError::Command {
                command: self.command_line(),
                message: format!("exited with {}", output.status),
            });
        }
        let raw = String::from_utf8_lossy(&output.stdout);
        tracing::debug!(raw = %raw.trim(), "host date output");
        NormalizedDate::normalize(&raw)
    }
}

/// Always returns the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedDateSource(pub NormalizedDate);

impl DateSource for FixedDateSource {
    fn today(&self) -> Result<NormalizedDate, DateError> {
        Ok(self.0)
    }
}
