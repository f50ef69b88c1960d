//! Assembles a transaction record from one OCR text blob.

use regex::Regex;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::record::{TransactionRecord, PLACEHOLDER_ACCOUNT};

use super::patterns::{self, DATE_CURRENT_YEAR, DEFAULT_YEAR};
use super::{amount, date, description, operation, recipient};
use super::{NOT_FOUND, UNREADABLE};

/// Rule-based parser for payment-confirmation text.
///
/// Stateless apart from its compiled rules: parsing the same text twice
/// yields identical records, and no input can make it fail. Fields with
/// no match carry the `"N/A"` sentinel, never an empty string.
pub struct VoucherParser {
    date_rule: Regex,
    year: String,
    placeholder_account: String,
}

impl VoucherParser {
    /// Create a parser with the default year and account placeholder.
    pub fn new() -> Self {
        Self {
            date_rule: DATE_CURRENT_YEAR.clone(),
            year: DEFAULT_YEAR.to_string(),
            placeholder_account: PLACEHOLDER_ACCOUNT.to_string(),
        }
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            date_rule: patterns::date_pattern_for_year(&config.year),
            year: config.year.clone(),
            placeholder_account: config.placeholder_account.clone(),
        }
    }

    /// Set the year recognized by the date rule.
    pub fn with_year(mut self, year: &str) -> Self {
        self.date_rule = patterns::date_pattern_for_year(year);
        self.year = year.to_string();
        self
    }

    /// Set the value written to both account columns.
    pub fn with_placeholder_account(mut self, account: impl Into<String>) -> Self {
        self.placeholder_account = account.into();
        self
    }

    /// Parse one OCR text blob into a fully-populated record.
    pub fn parse(&self, text: &str, display_name: &str) -> TransactionRecord {
        let record = TransactionRecord {
            date: date::extract_date_with(&self.date_rule, &self.year, text)
                .unwrap_or_else(not_found),
            operation_number: operation::extract_operation_number(text)
                .unwrap_or_else(not_found),
            amount: amount::extract_amount(text).unwrap_or_else(not_found),
            origin_account: self.placeholder_account.clone(),
            destination_account: self.placeholder_account.clone(),
            recipient: recipient::extract_recipient(text).unwrap_or_else(not_found),
            description: description::derive_description(display_name),
        };

        debug!(
            "parsed {}: date={} operation={} amount={}",
            display_name, record.date, record.operation_number, record.amount
        );

        record
    }

    /// Record for an image the OCR engine could not read.
    ///
    /// The four text-derived fields carry the failure marker; the
    /// description still derives from the filename.
    pub fn unreadable(&self, display_name: &str) -> TransactionRecord {
        TransactionRecord {
            date: UNREADABLE.to_string(),
            operation_number: UNREADABLE.to_string(),
            amount: UNREADABLE.to_string(),
            origin_account: self.placeholder_account.clone(),
            destination_account: self.placeholder_account.clone(),
            recipient: UNREADABLE.to_string(),
            description: description::derive_description(display_name),
        }
    }
}

impl Default for VoucherParser {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found() -> String {
    NOT_FOUND.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SAMPLE: &str = "\
**Constancia de transferencia**\n\
Pagado el 14 marzo 2025 a las 10:42\n\
Número de operación 20250314\n\
Monto: S/ 1,250.00\n\
Enviado a Juan Pérez\n\
**BCP**";

    #[test]
    fn assembles_a_full_record() {
        let parser = VoucherParser::new();
        let record = parser.parse(SAMPLE, "recibo.jpeg");

        assert_eq!(record.date, "14 marzo 2025");
        assert_eq!(record.operation_number, "20250314");
        assert_eq!(record.amount, "S/ 1,250.00");
        assert_eq!(record.origin_account, "0000");
        assert_eq!(record.destination_account, "0000");
        assert_eq!(record.recipient, "Juan Pérez");
        assert_eq!(record.description, "recibo");
    }

    #[test]
    fn unmatched_text_yields_sentinels_everywhere() {
        let parser = VoucherParser::new();
        let record = parser.parse("texto sin ningun dato util", "captura.png");

        assert_eq!(record.date, NOT_FOUND);
        assert_eq!(record.operation_number, NOT_FOUND);
        assert_eq!(record.amount, NOT_FOUND);
        assert_eq!(record.recipient, NOT_FOUND);
        assert_eq!(record.origin_account, "0000");
        assert_eq!(record.description, "captura");
    }

    #[test]
    fn parsing_is_deterministic() {
        let parser = VoucherParser::new();
        assert_eq!(
            parser.parse(SAMPLE, "recibo.jpeg"),
            parser.parse(SAMPLE, "recibo.jpeg")
        );
    }

    #[test]
    fn empty_input_still_populates_every_field() {
        let parser = VoucherParser::new();
        let record = parser.parse("", "");

        assert_eq!(record.date, NOT_FOUND);
        assert_eq!(record.operation_number, NOT_FOUND);
        assert_eq!(record.amount, NOT_FOUND);
        assert_eq!(record.recipient, NOT_FOUND);
        assert_eq!(record.description, "");
    }

    #[test]
    fn unreadable_record_carries_the_failure_marker() {
        let parser = VoucherParser::new();
        let record = parser.unreadable("borrosa.jpg");

        assert_eq!(record.date, UNREADABLE);
        assert_eq!(record.operation_number, UNREADABLE);
        assert_eq!(record.amount, UNREADABLE);
        assert_eq!(record.recipient, UNREADABLE);
        assert_eq!(record.origin_account, "0000");
        assert_eq!(record.description, "borrosa");
    }

    #[test]
    fn configured_year_flows_into_the_date_rule() {
        let parser = VoucherParser::new().with_year("2026");
        let record = parser.parse("pagado el 2 enero 2026", "a.png");
        assert_eq!(record.date, "2 enero 2026");

        let record = parser.parse("pagado el 2 enero 2025", "a.png");
        assert_eq!(record.date, NOT_FOUND);
    }
}
