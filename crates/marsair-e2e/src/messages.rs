//! Result-message scraping and classification.
//!
//! The results page reports the search outcome as free text. The
//! known messages are matched first; when none matches a whole line,
//! the body text is scanned line by line as a fallback.

use regex::Regex;
use std::sync::OnceLock;

/// Classified outcome of a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// "Seats available!"
    SeatsAvailable,
    /// "Sorry, there are no more seats available."
    NoSeats,
    /// "Unfortunately, this schedule is not possible."
    ScheduleNotPossible,
    /// "Promotional code … N% discount!"
    PromoApplied {
        /// Advertised discount percentage
        discount_percent: u8,
    },
    /// "Sorry, code X is not valid"
    PromoRejected {
        /// The rejected code as echoed by the page
        code: String,
    },
}

fn promo_applied_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"Promotional code .*?(\d+)% discount!").expect("pattern is valid")
    })
}

fn promo_rejected_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"Sorry, code (\S+) is not valid").expect("pattern is valid"))
}

/// Literal messages the page can surface, in scan priority order
pub const KNOWN_MESSAGES: &[&str] = &[
    "Seats available!",
    "Sorry, there are no more seats available.",
    "Unfortunately, this schedule is not possible.",
    "Promotional code",
    "Sorry, code",
];

/// Classify a piece of scraped text into the primary search outcome.
///
/// Scan priority follows [`KNOWN_MESSAGES`]: seat availability first,
/// then schedule feasibility, then promo feedback. Use
/// [`classify_all`] when a page carries more than one message (a
/// promo confirmation renders alongside "Seats available!").
#[must_use]
pub fn classify(text: &str) -> Option<SearchOutcome> {
    classify_all(text).into_iter().next()
}

/// All outcomes present in a piece of scraped text, in priority order
#[must_use]
pub fn classify_all(text: &str) -> Vec<SearchOutcome> {
    let mut outcomes = Vec::new();
    if text.contains("Seats available!") {
        outcomes.push(SearchOutcome::SeatsAvailable);
    }
    if text.contains("Sorry, there are no more seats available.") {
        outcomes.push(SearchOutcome::NoSeats);
    }
    if text.contains("Unfortunately, this schedule is not possible.") {
        outcomes.push(SearchOutcome::ScheduleNotPossible);
    }
    if let Some(captures) = promo_applied_pattern().captures(text) {
        if let Ok(percent) = captures[1].parse::<u8>() {
            outcomes.push(SearchOutcome::PromoApplied {
                discount_percent: percent,
            });
        }
    }
    if let Some(captures) = promo_rejected_pattern().captures(text) {
        outcomes.push(SearchOutcome::PromoRejected {
            code: captures[1].to_string(),
        });
    }
    outcomes
}

/// Find the first non-empty body line carrying a known message.
///
/// Fallback scrape strategy for when the message element cannot be
/// located directly: split the body text into trimmed lines and return
/// the first one containing any known message.
#[must_use]
pub fn extract_result_line(body_text: &str) -> Option<&str> {
    body_text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| KNOWN_MESSAGES.iter().any(|msg| line.contains(msg)))
}
