//! Date extraction pinned to a single year.

use regex::Regex;

use super::patterns::{DATE_CURRENT_YEAR, DEFAULT_YEAR};

/// Find the first `<day> <month-word> <year>` occurrence for the default
/// year and reassemble it with single spaces.
pub fn extract_date(text: &str) -> Option<String> {
    extract_date_with(&DATE_CURRENT_YEAR, DEFAULT_YEAR, text)
}

/// Year-configurable variant, driven with a rule from
/// [`super::patterns::date_pattern_for_year`].
pub fn extract_date_with(rule: &Regex, year: &str, text: &str) -> Option<String> {
    rule.captures(text)
        .map(|caps| format!("{} {} {}", &caps[1], &caps[2], year))
}
