//! Error types for the constancia-core library.

use thiserror::Error;

/// Main error type for the constancia library.
#[derive(Error, Debug)]
pub enum ConstanciaError {
    /// Recognition error from an OCR adapter.
    #[error("recognition error: {0}")]
    Recognition(#[from] RecognitionError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors produced by the OCR port.
///
/// These are per-image: the batch pipeline records them and moves on to
/// the next image.
#[derive(Error, Debug)]
pub enum RecognitionError {
    /// The OCR engine could not be started at all.
    #[error("engine unavailable: {0}")]
    EngineUnavailable(String),

    /// The engine ran but could not read the image.
    #[error("recognition failed: {0}")]
    Failed(String),

    /// The input bytes are not a decodable image.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the constancia library.
pub type Result<T> = std::result::Result<T, ConstanciaError>;
