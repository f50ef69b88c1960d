//! Tesseract-backed recognizer adapter.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use constancia_core::ocr::{ProgressSink, Recognizer};
use constancia_core::RecognitionError;

/// Recognizer shelling out to the `tesseract` binary.
///
/// The image bytes are written to a temporary file and recognized with
/// the given language pack; stdout is the recognized text. Tesseract
/// exposes no incremental signal, so only the progress endpoints are
/// emitted.
pub struct TesseractRecognizer {
    binary: String,
}

impl TesseractRecognizer {
    pub fn new() -> Self {
        Self {
            binary: "tesseract".to_string(),
        }
    }

    /// Override the binary path.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }
}

impl Default for TesseractRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Recognizer for TesseractRecognizer {
    async fn recognize(
        &self,
        image: &[u8],
        language: &str,
        mut progress: ProgressSink<'_>,
    ) -> Result<String, RecognitionError> {
        progress(0.0);

        let dir = tempfile::tempdir()
            .map_err(|e| RecognitionError::EngineUnavailable(e.to_string()))?;
        let input = dir.path().join("page.png");
        tokio::fs::write(&input, image)
            .await
            .map_err(|e| RecognitionError::EngineUnavailable(e.to_string()))?;

        let output = Command::new(&self.binary)
            .arg(&input)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                RecognitionError::EngineUnavailable(format!("{}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecognitionError::Failed(stderr.trim().to_string()));
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("tesseract produced {} characters", text.len());

        progress(1.0);
        Ok(text)
    }
}
