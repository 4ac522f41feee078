//! Conversion configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::util::validate_language_code;

/// Settings for conversion operations, loadable from a YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionConfig {
    /// Default source language code (two-letter lowercase).
    pub source_language: String,
    /// Default target language code (two-letter lowercase).
    pub target_language: String,
    /// Split multi-sentence text segments into one unit per sentence.
    pub split_sentences: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        ConversionConfig {
            source_language: "en".to_string(),
            target_language: "es".to_string(),
            split_sentences: false,
        }
    }
}

impl ConversionConfig {
    /// Create a configuration, validating the language codes.
    pub fn new(source_language: &str, target_language: &str, split_sentences: bool) -> Result<Self> {
        let config = ConversionConfig {
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            split_sentences,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from an optional YAML file.
    ///
    /// A missing path (or `None`) yields the defaults; a present file with
    /// invalid contents is an error rather than a silent fallback.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path)?;
        let config: ConversionConfig = serde_yaml::from_str(&raw)
            .map_err(|e| Error::Configuration(format!("invalid config file: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (code, field) in [
            (&self.source_language, "source_language"),
            (&self.target_language, "target_language"),
        ] {
            if !validate_language_code(code) {
                return Err(Error::Configuration(format!(
                    "invalid {field}: {code} (must be a 2-letter lowercase code)"
                )));
            }
        }
        Ok(())
    }
}
