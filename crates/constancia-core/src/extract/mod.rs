//! Heuristic field extraction from noisy OCR text.
//!
//! Each rule lives in its own module and tolerates the character
//! substitutions Tesseract commonly produces on mobile-banking
//! screenshots. Rules share no state and always yield a value: absence
//! of a match becomes the `"N/A"` sentinel at record-assembly time.

mod parser;
pub mod patterns;

pub mod amount;
pub mod date;
pub mod description;
pub mod operation;
pub mod recipient;

pub use parser::VoucherParser;

/// Sentinel for a field with no recognizable cue in the text.
pub const NOT_FOUND: &str = "N/A";

/// Marker for the fields of a record whose image failed recognition,
/// distinct from [`NOT_FOUND`] so the export can tell "no data found"
/// from "could not read the image".
pub const UNREADABLE: &str = "ERROR";
