//! Approximate progress through the year toward December 25.
//!
//! Every month counts as 30 days and the year as 365. The result feeds a
//! progress bar, nothing else, so leap years and month lengths are ignored.

use serde::{Deserialize, Serialize};

use crate::date::{Month, NormalizedDate};

pub const DAYS_IN_YEAR: i32 = 365;
pub const DAYS_PER_MONTH: i32 = 30;
pub const CHRISTMAS_MONTH: Month = Month::Dec;
pub const CHRISTMAS_DAY: i32 = 25;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEstimate {
    /// Approximate days left; negative after Christmas.
    pub days_remaining: i32,
    /// Unclamped fraction of the year elapsed.
    pub fraction: f64,
}

impl ProgressEstimate {
    /// Whole percentage clamped to 0..=100 for rendering.
    pub fn percent(&self) -> u8 {
        (self.fraction * 100.0).clamp(0.0, 100.0) as u8
    }
}

pub fn days_to_christmas(date: &NormalizedDate) -> i32 {
    let month_diff =
        (CHRISTMAS_MONTH.number() as i32 - date.month().number() as i32) * DAYS_PER_MONTH;
    let day_diff = CHRISTMAS_DAY - date.day() as i32;
    month_diff + day_diff
}

pub fn estimate(date: &NormalizedDate) -> ProgressEstimate {
    let days_remaining = days_to_christmas(date);
    let fraction = (DAYS_IN_YEAR - days_remaining) as f64 / DAYS_IN_YEAR as f64;
    ProgressEstimate {
        days_remaining,
        fraction,
    }
}
