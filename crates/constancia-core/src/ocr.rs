//! OCR port consumed by the batch pipeline.

use async_trait::async_trait;

use crate::error::RecognitionError;

/// Per-image recognition result, produced in input order.
#[derive(Debug, Clone)]
pub enum RecognitionOutcome {
    /// The engine produced text.
    Recognized(String),

    /// The engine failed; the reason is kept for logging.
    Failed(String),
}

/// Sink for the fractional sub-progress of one in-flight recognition,
/// `0.0` at start and `1.0` at completion.
pub type ProgressSink<'a> = &'a mut (dyn FnMut(f64) + Send);

/// Capability that turns image bytes into recognized text.
///
/// One invocation per image; an invocation may take a long time and may
/// fail without affecting the caller. Implementations should report
/// coarse sub-progress through the sink when they can; adapters with no
/// incremental signal emit only the endpoints.
#[async_trait]
pub trait Recognizer: Send + Sync {
    async fn recognize(
        &self,
        image: &[u8],
        language: &str,
        progress: ProgressSink<'_>,
    ) -> Result<String, RecognitionError>;
}
