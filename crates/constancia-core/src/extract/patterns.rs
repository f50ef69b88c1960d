//! Regex rules for payment-confirmation extraction.
//!
//! Each rule keeps its OCR-confusion alternatives written out; adding a
//! newly observed confusion case means adding one more alternative.

use lazy_static::lazy_static;
use regex::Regex;

/// The single year the date rule recognizes by default.
pub const DEFAULT_YEAR: &str = "2025";

lazy_static! {
    // Date: 1-2 digit day, a month word (accented vowels and ñ allowed),
    // and the literal current year. The month word is not validated.
    pub static ref DATE_CURRENT_YEAR: Regex = Regex::new(
        r"(\d{1,2})\s+([a-zA-ZñÑáéíóúÁÉÍÓÚ]+)\s+2025"
    ).unwrap();

    // Operation number: labeled phrase followed by six or more digits.
    // "numero"/"número" and the "numera" misreading are accepted, as is
    // the accentless "operacion".
    pub static ref OPERATION_NUMBER: Regex = Regex::new(
        r"(?i)n[uú]m(?:ero|era)?\s+de\s+operaci[oó]n\s+(\d{6,})"
    ).unwrap();

    // Amount: the S/ currency marker, with the digit 5 accepted for a
    // misread S. Thousands groups and the two-decimal suffix are
    // optional; at most one whitespace character may follow the slash.
    pub static ref AMOUNT: Regex = Regex::new(
        r"[S5]/\s?\d+(?:,\d{3})*(?:\.\d{2})?"
    ).unwrap();

    // Recipient: the "Enviar a" cue with every observed misreading of
    // the verb root (accented í, 1/l for i, u for i, truncated and
    // participle suffixes), then a non-greedy capture up to a newline or
    // a markdown double-asterisk. The terminator is required.
    pub static ref RECIPIENT: Regex = Regex::new(
        r"(?i)\bEnv(?:iar|iad[oa]|íar|i(?:ar|ad[oa])|u(?:ar|ad[oa])|v1ar|vlar|viar|vad[oa]|l[oa])\s+a\s+([^\n*]+?)(?:\n|\*\*)"
    ).unwrap();

    // Filename extension: a trailing dot plus 3-4 alphanumerics.
    pub static ref FILE_EXTENSION: Regex = Regex::new(
        r"\.[a-zA-Z0-9]{3,4}$"
    ).unwrap();
}

/// Compile the date rule for a specific year.
///
/// Only the configured year is ever recognized. This is deliberate
/// current-year matching, not a general date parser.
pub fn date_pattern_for_year(year: &str) -> Regex {
    Regex::new(&format!(
        r"(\d{{1,2}})\s+([a-zA-ZñÑáéíóúÁÉÍÓÚ]+)\s+{}",
        regex::escape(year)
    ))
    .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_date_rule_matches_compiled_default_year() {
        let compiled = date_pattern_for_year(DEFAULT_YEAR);
        assert_eq!(compiled.as_str(), DATE_CURRENT_YEAR.as_str());
    }
}
