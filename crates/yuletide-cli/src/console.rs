//! Console reporters.

use std::sync::atomic::{AtomicBool, Ordering};

use yuletide_core::{CheckEvent, ProgressEstimate, Reporter};

const BAR_WIDTH: usize = 20;

/// Human-readable output.
///
/// Per-cycle "not yet" lines are suppressed while the background watch runs.
#[derive(Debug, Default)]
pub struct TextReporter {
    watching: AtomicBool,
}

impl TextReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for TextReporter {
    fn report(&self, event: &CheckEvent) {
        match event {
            CheckEvent::ChristmasConfirmed { .. } => println!("It is Christmas!"),
            CheckEvent::NotYet { estimate, .. } => {
                if !self.watching.load(Ordering::SeqCst) {
                    println!("It is not Christmas yet.");
                    println!("{}", progress_line(estimate));
                }
            }
            CheckEvent::DateUnavailable { reason, .. } => {
                eprintln!("Could not determine if it's Christmas: {reason}");
            }
            CheckEvent::InvalidChoice { expected, .. } => {
                println!("Invalid choice. Please enter {}.", quote_tokens(expected));
            }
            CheckEvent::ChoiceForced { .. } => {
                println!("Too many invalid choices. Checking indefinitely.");
            }
            CheckEvent::WatchStarted { .. } => self.watching.store(true, Ordering::SeqCst),
            CheckEvent::WatchStopped { confirmed, .. } => {
                self.watching.store(false, Ordering::SeqCst);
                if *confirmed {
                    println!("Press Enter to finish.");
                }
            }
            CheckEvent::SessionAborted { reason, .. } => eprintln!("error: {reason}"),
            CheckEvent::CycleStarted { .. } | CheckEvent::SessionEnded { .. } => {}
        }
    }
}

/// One JSON object per line.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, event: &CheckEvent) {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(e) => tracing::warn!(error = %e, "failed to serialize event"),
        }
    }
}

pub fn progress_line(estimate: &ProgressEstimate) -> String {
    format!(
        "Days until Christmas: [{}] {:>3}% ({} days)",
        render_bar(estimate.percent(), BAR_WIDTH),
        estimate.percent(),
        estimate.days_remaining
    )
}

pub fn render_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("{}{}", "#".repeat(filled), "-".repeat(width - filled))
}

/// `["c", "i", "e"]` -> `'c', 'i', or 'e'`
fn quote_tokens(tokens: &[String]) -> String {
    let quoted: Vec<String> = tokens.iter().map(|t| format!("'{t}'")).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_proportionally() {
        assert_eq!(render_bar(0, 10), "----------");
        assert_eq!(render_bar(53, 10), "#####-----");
        assert_eq!(render_bar(100, 10), "##########");
        assert_eq!(render_bar(255, 10), "##########");
    }

    #[test]
    fn progress_line_shows_percent_and_days() {
        let estimate = ProgressEstimate {
            days_remaining: 171,
            fraction: 194.0 / 365.0,
        };
        assert_eq!(
            progress_line(&estimate),
            "Days until Christmas: [##########----------]  53% (171 days)"
        );
    }

    #[test]
    fn menu_tokens_are_listed_like_a_sentence() {
        let tokens = vec!["c".to_string(), "i".to_string(), "e".to_string()];
        assert_eq!(quote_tokens(&tokens), "'c', 'i', or 'e'");
        assert_eq!(quote_tokens(&tokens[..1]), "'c'");
    }
}
