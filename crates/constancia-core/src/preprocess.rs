//! Image preprocessing applied before recognition.

use std::io::Cursor;

use image::ImageFormat;
use tracing::debug;

use crate::error::Result;

/// Optional grayscale conversion applied to image bytes before OCR.
///
/// Extraction is indifferent to whether this step ran.
pub struct Preprocessor {
    grayscale: bool,
}

impl Preprocessor {
    /// Create a preprocessor with grayscale enabled.
    pub fn new() -> Self {
        Self { grayscale: true }
    }

    /// Enable or disable grayscale conversion.
    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    /// Transform raw image bytes; pass-through when disabled.
    pub fn apply(&self, data: &[u8]) -> Result<Vec<u8>> {
        if !self.grayscale {
            return Ok(data.to_vec());
        }

        let decoded = image::load_from_memory(data)?;
        let gray = image::DynamicImage::ImageLuma8(decoded.to_luma8());

        let mut out = Cursor::new(Vec::new());
        gray.write_to(&mut out, ImageFormat::Png)?;

        debug!(
            "grayscaled image: {} -> {} bytes",
            data.len(),
            out.get_ref().len()
        );

        Ok(out.into_inner())
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
