//! Amount extraction with 5→S normalization.

use super::patterns::AMOUNT;

/// Find the first currency-like token.
///
/// A leading `5/` is a misread `S/` and is normalized; the whitespace
/// slot after the marker, when present, becomes a single plain space.
pub fn extract_amount(text: &str) -> Option<String> {
    AMOUNT.find(text).map(|m| normalize(m.as_str()))
}

fn normalize(token: &str) -> String {
    let token = match token.strip_prefix("5/") {
        Some(rest) => format!("S/{rest}"),
        None => token.to_string(),
    };
    collapse_first_whitespace(&token)
}

/// Replace the first whitespace run with a single space.
fn collapse_first_whitespace(s: &str) -> String {
    let Some(start) = s.find(|c: char| c.is_whitespace()) else {
        return s.to_string();
    };
    let end = s[start..]
        .find(|c: char| !c.is_whitespace())
        .map(|offset| start + offset)
        .unwrap_or(s.len());
    format!("{} {}", &s[..start], &s[end..])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn extracts_grouped_amount_with_decimals() {
        assert_eq!(
            extract_amount("Monto: S/ 1,250.00"),
            Some("S/ 1,250.00".to_string())
        );
    }

    #[test]
    fn normalizes_misread_five_to_s() {
        assert_eq!(extract_amount("Monto: 5/1250"), Some("S/1250".to_string()));
        assert_eq!(
            extract_amount("Total 5/ 300.00 hoy"),
            Some("S/ 300.00".to_string())
        );
    }

    #[test]
    fn normalizes_odd_whitespace_after_marker() {
        assert_eq!(extract_amount("S/\t25"), Some("S/ 25".to_string()));
    }

    #[test]
    fn first_token_wins() {
        assert_eq!(
            extract_amount("S/ 10.00 luego S/ 99.99"),
            Some("S/ 10.00".to_string())
        );
    }

    #[test]
    fn bare_integer_amount_matches() {
        assert_eq!(extract_amount("S/400"), Some("S/400".to_string()));
    }

    #[test]
    fn no_marker_yields_nothing() {
        assert_eq!(extract_amount("monto total 1,250.00"), None);
        assert_eq!(extract_amount(""), None);
    }
}
