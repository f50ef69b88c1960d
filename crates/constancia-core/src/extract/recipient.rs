//! Recipient extraction.
//!
//! The cue accepts every observed OCR misreading of the
//! "Enviar/Enviado" root. The variant set is kept as accumulated;
//! pruning it reduces recall on real scanned input.

use super::patterns::RECIPIENT;

/// Capture the span after the send cue, up to a newline or a markdown
/// double-asterisk, trimmed and with whitespace runs collapsed.
pub fn extract_recipient(text: &str) -> Option<String> {
    RECIPIENT
        .captures(text)
        .map(|caps| collapse_whitespace(&caps[1]))
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
