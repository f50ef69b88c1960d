//! Input and output records of the batch pipeline.

use serde::{Deserialize, Serialize};

/// Placeholder written to both account columns.
///
/// Account numbers are not extracted from the text; the columns are
/// reserved for future extraction and always carry this value.
pub const PLACEHOLDER_ACCOUNT: &str = "0000";

/// One image submitted to a batch run.
///
/// The payload is opaque to the pipeline. The display name (typically
/// the original filename) is only used to derive the record description.
#[derive(Debug, Clone)]
pub struct InputImage {
    /// Raw image bytes.
    pub data: Vec<u8>,

    /// Display name, typically the original filename.
    pub display_name: String,
}

impl InputImage {
    pub fn new(data: Vec<u8>, display_name: impl Into<String>) -> Self {
        Self {
            data,
            display_name: display_name.into(),
        }
    }
}

/// Structured result of extracting one payment confirmation.
///
/// Every field is always populated: a field with no match carries the
/// `"N/A"` sentinel, and a record for an image that could not be read
/// carries `"ERROR"` in its four text-derived fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Date as `"<day> <month> <year>"`, e.g. `"14 marzo 2025"`.
    pub date: String,

    /// Operation number, a digit run of at least six characters.
    pub operation_number: String,

    /// Amount with the `S/` currency marker, e.g. `"S/ 1,250.00"`.
    pub amount: String,

    /// Origin account placeholder.
    pub origin_account: String,

    /// Destination account placeholder.
    pub destination_account: String,

    /// Recipient free text following the send cue.
    pub recipient: String,

    /// Display name with its file extension stripped.
    pub description: String,
}

/// CSV column headers, in the fixed export order.
pub const CSV_HEADERS: [&str; 7] = [
    "Fecha",
    "Numero de operacion",
    "Monto",
    "Cuenta Origen",
    "Cuenta Destino",
    "Destinatario",
    "Descripcion (nombre del archivo)",
];

impl TransactionRecord {
    /// Project the record into a CSV row matching [`CSV_HEADERS`].
    pub fn csv_row(&self) -> [&str; 7] {
        [
            &self.date,
            &self.operation_number,
            &self.amount,
            &self.origin_account,
            &self.destination_account,
            &self.recipient,
            &self.description,
        ]
    }
}
