//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};

use crate::extract::patterns::DEFAULT_YEAR;
use crate::models::record::PLACEHOLDER_ACCOUNT;

/// Main configuration for the constancia pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstanciaConfig {
    /// OCR invocation configuration.
    pub ocr: OcrConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

impl Default for ConstanciaConfig {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }
}

/// OCR invocation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language hint passed to the OCR engine.
    pub language: String,

    /// Convert images to grayscale before recognition.
    pub grayscale: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "spa".to_string(),
            grayscale: true,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// The single year the date rule recognizes.
    pub year: String,

    /// Value written to both account columns.
    pub placeholder_account: String,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR.to_string(),
            placeholder_account: PLACEHOLDER_ACCOUNT.to_string(),
        }
    }
}

impl ConstanciaConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_carry_documented_literals() {
        let config = ConstanciaConfig::default();

        assert_eq!(config.ocr.language, "spa");
        assert!(config.ocr.grayscale);
        assert_eq!(config.extraction.year, "2025");
        assert_eq!(config.extraction.placeholder_account, "0000");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: ConstanciaConfig =
            serde_json::from_str(r#"{"ocr": {"language": "eng"}}"#).unwrap();

        assert_eq!(config.ocr.language, "eng");
        assert!(config.ocr.grayscale);
        assert_eq!(config.extraction.year, "2025");
    }
}
