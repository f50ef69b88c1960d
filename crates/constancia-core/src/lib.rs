//! Core library for payment-confirmation OCR processing.
//!
//! This crate provides:
//! - Heuristic field extraction from noisy OCR text (date, operation
//!   number, amount, recipient)
//! - The batch pipeline driving recognition image by image
//! - The `Recognizer` port implemented by OCR adapters

pub mod error;
pub mod extract;
pub mod models;
pub mod ocr;
pub mod pipeline;
pub mod preprocess;

pub use error::{ConstanciaError, RecognitionError, Result};
pub use extract::{VoucherParser, NOT_FOUND, UNREADABLE};
pub use models::config::{ConstanciaConfig, ExtractionConfig, OcrConfig};
pub use models::record::{InputImage, TransactionRecord, CSV_HEADERS};
pub use ocr::{ProgressSink, RecognitionOutcome, Recognizer};
pub use pipeline::{BatchObserver, BatchPipeline, CancelHandle, NullObserver};
pub use preprocess::Preprocessor;
