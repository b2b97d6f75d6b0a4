//! December 25 recognition.
//!
//! The matcher is deliberately permissive: the date is Christmas if ANY
//! pattern of the table finds a case-insensitive match anywhere in the
//! string. Patterns overlap on purpose (spellings, slash and dash forms) so
//! that whatever shape the host date takes, a "Dec 25" lookalike is caught.

use std::sync::OnceLock;

use regex::{RegexSet, RegexSetBuilder};

use crate::date::NormalizedDate;
use crate::error::Result;

/// Recognition table, in evaluation order.
///
/// `\d{2}/12` accepts any `DD/12` date; it is kept as-is and must not be
/// widened further.
pub const CHRISTMAS_PATTERNS: &[&str] = &[
    r"Dec\s+25",
    r"Dec\.?\s+25",
    r"Dece?\w*\s+25",
    r"25\s+Dec",
    r"25/12",
    r"\d{2}/12",
    r"12-25",
    r"X{2,}\s+25\s+Dec",
];

/// Compiled, read-only set of recognition patterns.
#[derive(Debug, Clone)]
pub struct PatternSet {
    patterns: &'static [&'static str],
    set: RegexSet,
}

impl PatternSet {
    /// # Errors
    ///
    /// Returns [`CoreError::Pattern`](crate::error::CoreError::Pattern) if
    /// any pattern fails to compile.
    pub fn new(patterns: &'static [&'static str]) -> Result<Self> {
        let set = RegexSetBuilder::new(patterns)
            .case_insensitive(true)
            .build()?;
        Ok(Self { patterns, set })
    }

    /// The built-in Christmas table, compiled once per process.
    pub fn christmas() -> &'static PatternSet {
        static CHRISTMAS: OnceLock<PatternSet> = OnceLock::new();
        CHRISTMAS.get_or_init(|| {
            PatternSet::new(CHRISTMAS_PATTERNS).expect("built-in Christmas patterns are valid")
        })
    }

    pub fn patterns(&self) -> &'static [&'static str] {
        self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ChristmasMatcher {
    set: &'static PatternSet,
}

impl Default for ChristmasMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ChristmasMatcher {
    pub fn new() -> Self {
        Self {
            set: PatternSet::christmas(),
        }
    }

    pub fn pattern_set(&self) -> &PatternSet {
        self.set
    }

    pub fn is_match(&self, text: &str) -> bool {
        let hit = self.set.set.is_match(text);
        tracing::debug!(text, hit, "christmas pattern scan");
        hit
    }

    /// `None` stands for a date that failed to normalize and never matches.
    pub fn matches(&self, date: Option<&NormalizedDate>) -> bool {
        match date {
            Some(date) => self.is_match(&date.to_string()),
            None => false,
        }
    }

    /// Patterns that hit `text`, in table order.
    pub fn matching_patterns(&self, text: &str) -> Vec<&'static str> {
        self.set
            .set
            .matches(text)
            .into_iter()
            .map(|i| self.set.patterns[i])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::date::Month;
    use crate::error::CoreError;
    use proptest::prelude::*;

    #[test]
    fn christmas_in_supported_formats() {
        let matcher = ChristmasMatcher::new();
        for text in [
            "Dec 25",
            "25 Dec",
            "25/12",
            "12-25",
            "Dece 25",
            "December 25",
            "Dec. 25",
            "2024-12-25",
            "XX 25 Dec",
        ] {
            assert!(matcher.is_match(text), "{text} should match");
        }
    }

    #[test]
    fn other_dates_do_not_match() {
        let matcher = ChristmasMatcher::new();
        for text in ["Jan 01", "Nov 09", "Jul 04", "Dec 24", "Dec 26", "Nov 25"] {
            assert!(!matcher.is_match(text), "{text} should not match");
        }
    }

    #[test]
    fn any_day_slash_december_is_accepted() {
        let matcher = ChristmasMatcher::new();
        assert!(matcher.is_match("03/12"));
        assert_eq!(matcher.matching_patterns("03/12"), vec![r"\d{2}/12"]);
    }

    #[test]
    fn failed_normalization_never_matches() {
        assert!(!ChristmasMatcher::new().matches(None));
    }

    #[test]
    fn normalized_dates_match_by_display() {
        let matcher = ChristmasMatcher::new();
        let christmas = NormalizedDate::new(Month::Dec, 25).unwrap();
        let eve = NormalizedDate::new(Month::Dec, 24).unwrap();
        assert!(matcher.matches(Some(&christmas)));
        assert!(!matcher.matches(Some(&eve)));
    }

    #[test]
    fn matching_patterns_follow_table_order() {
        let hits = ChristmasMatcher::new().matching_patterns("Dec 25");
        assert_eq!(hits, vec![r"Dec\s+25", r"Dec\.?\s+25", r"Dece?\w*\s+25"]);
    }

    #[test]
    fn builtin_table_compiles_once() {
        let a = PatternSet::christmas() as *const PatternSet;
        let b = PatternSet::christmas() as *const PatternSet;
        assert_eq!(a, b);
        assert_eq!(PatternSet::christmas().len(), CHRISTMAS_PATTERNS.len());
    }

    #[test]
    fn broken_pattern_is_a_pattern_error() {
        let err = PatternSet::new(&[r"Dec\s+25", r"(unclosed"]).unwrap_err();
        assert!(matches!(err, CoreError::Pattern(_)));
    }

    proptest! {
        #[test]
        fn matching_ignores_case(text in "[a-zA-Z0-9 ./-]{0,16}") {
            let matcher = ChristmasMatcher::new();
            prop_assert_eq!(
                matcher.is_match(&text.to_lowercase()),
                matcher.is_match(&text.to_uppercase())
            );
        }

        #[test]
        fn matching_is_idempotent(text in "\\PC{0,24}") {
            let matcher = ChristmasMatcher::new();
            prop_assert_eq!(matcher.is_match(&text), matcher.is_match(&text));
        }

        #[test]
        fn only_december_25_normalized_dates_match(month in 1u32..=12, day in 1u32..=31) {
            let date = NormalizedDate::new(Month::from_number(month).unwrap(), day).unwrap();
            let expected = month == 12 && day == 25;
            prop_assert_eq!(ChristmasMatcher::new().matches(Some(&date)), expected);
        }
    }
}
