//! Best-effort match score recovery from the model's free-text report.
//!
//! Only used when the service did not send a structured score. The cascade is a heuristic over
//! natural-language output: it yields a plausible number, not a correct one.

use std::sync::LazyLock;

use regex::Regex;

/// Score used when nothing in the text looks like one.
pub const DEFAULT_MATCH_SCORE: u32 = 75;

/// Percentages outside this band are treated as noise in the "any N%" pass.
const PLAUSIBLE_PERCENT_MIN: u64 = 20;
const PLAUSIBLE_PERCENT_MAX: u64 = 100;

// Digits are ASCII only: `\d` would also capture other scripts' digits, which never parse.
static LABELLED_TOTAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:Total Match Percentage|Overall Match Score|Overall Match).*?([0-9]+)%")
        .expect("valid regex")
});
static OVERALL_MATCH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Overall Match.*?([0-9]+)%").expect("valid regex"));
static ANY_PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)%").expect("valid regex"));
static MATCH_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)match.*?([0-9]+)").expect("valid regex"));

/// Extracts a 0–100 match score from markdown analysis text.
///
/// Order, first hit wins:
/// 1. "Total Match Percentage" / "Overall Match Score" / "Overall Match" … N%
/// 2. "Overall Match" … N%
/// 3. the largest N% in [20, 100]
/// 4. "match" … N
/// 5. `DEFAULT_MATCH_SCORE`
pub fn extract_match_score(text: &str) -> u32 {
    first_capture(&LABELLED_TOTAL, text)
        .or_else(|| first_capture(&OVERALL_MATCH, text))
        .or_else(|| largest_plausible_percent(text))
        .or_else(|| first_capture(&MATCH_NUMBER, text))
        .map(clamp_percent)
        .unwrap_or(DEFAULT_MATCH_SCORE)
}

fn first_capture(pattern: &Regex, text: &str) -> Option<u64> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

fn largest_plausible_percent(text: &str) -> Option<u64> {
    ANY_PERCENT
        .captures_iter(text)
        .filter_map(|caps| caps.get(1)?.as_str().parse::<u64>().ok())
        .filter(|p| (PLAUSIBLE_PERCENT_MIN..=PLAUSIBLE_PERCENT_MAX).contains(p))
        .max()
}

fn clamp_percent(value: u64) -> u32 {
    value.min(100) as u32
}
