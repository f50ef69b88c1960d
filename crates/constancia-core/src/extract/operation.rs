//! Operation number extraction.

use super::patterns::OPERATION_NUMBER;

/// Find the labeled operation number: a case-insensitive
/// "número de operación" phrase followed by six or more digits.
pub fn extract_operation_number(text: &str) -> Option<String> {
    OPERATION_NUMBER
        .captures(text)
        .map(|caps| caps[1].to_string())
}
