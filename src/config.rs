//! Configuration types for a pipeline run.
//!
//! All behaviour is controlled through [`PipelineConfig`], built via its
//! [`PipelineConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share configs across threads and to diff two runs to
//! understand why their outputs differ.
//!
//! The engine handles live here too: a config carries an `Arc<EngineSet>`
//! built once at process start, so every run reads the same load outcome —
//! load once, degrade permanently on failure — and tests can hand in a set
//! of pre-failed or pre-succeeded stubs.

use crate::engines::EngineSet;
use crate::error::AnuvadError;
use std::fmt;
use std::sync::Arc;

/// Default character budget applied to translation input before inference.
///
/// Texts longer than this are passed through bounded — truncated at a char
/// boundary, never chunked. An accepted approximation, not a bug.
pub const DEFAULT_TRANSLATION_INPUT_BUDGET: usize = 4096;

/// Configuration for document processing.
///
/// Built via [`PipelineConfig::builder()`] or using
/// [`PipelineConfig::default()`] (Hindi→English, local engines only).
///
/// # Example
/// ```rust
/// use anuvad::PipelineConfig;
///
/// let config = PipelineConfig::builder()
///     .source_language("hi")
///     .target_language("en")
///     .ocr_languages("hin+eng")
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct PipelineConfig {
    /// Source-language code of incoming documents. Default: "hi".
    pub source_language: String,

    /// Target-language code for translation. Default: "en".
    pub target_language: String,

    /// Combined OCR language set in Tesseract notation. Default: "hin+eng".
    ///
    /// Scanned documents routinely mix the source script with Latin text
    /// (names, numbers, addresses), so the recogniser always carries a
    /// Latin-script model alongside the source script.
    pub ocr_languages: String,

    /// Character budget for translation input. Default:
    /// [`DEFAULT_TRANSLATION_INPUT_BUDGET`].
    pub translation_input_budget: usize,

    /// Minimum abstractive-summary length in words. Default: 30.
    pub summary_min_words: usize,

    /// Maximum abstractive-summary length in words. Default: 120.
    pub summary_max_words: usize,

    /// Capability providers shared by every run of this process.
    pub engines: Arc<EngineSet>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_language: "hi".to_string(),
            target_language: "en".to_string(),
            ocr_languages: "hin+eng".to_string(),
            translation_input_budget: DEFAULT_TRANSLATION_INPUT_BUDGET,
            summary_min_words: 30,
            summary_max_words: 120,
            engines: Arc::new(EngineSet::local_only()),
        }
    }
}

impl fmt::Debug for PipelineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineConfig")
            .field("source_language", &self.source_language)
            .field("target_language", &self.target_language)
            .field("ocr_languages", &self.ocr_languages)
            .field("translation_input_budget", &self.translation_input_budget)
            .field("summary_min_words", &self.summary_min_words)
            .field("summary_max_words", &self.summary_max_words)
            .field("engines", &self.engines)
            .finish()
    }
}

impl PipelineConfig {
    /// Create a new builder for `PipelineConfig`.
    pub fn builder() -> PipelineConfigBuilder {
        PipelineConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`PipelineConfig`].
#[derive(Debug)]
pub struct PipelineConfigBuilder {
    config: PipelineConfig,
}

impl PipelineConfigBuilder {
    pub fn source_language(mut self, code: impl Into<String>) -> Self {
        self.config.source_language = code.into();
        self
    }

    pub fn target_language(mut self, code: impl Into<String>) -> Self {
        self.config.target_language = code.into();
        self
    }

    pub fn ocr_languages(mut self, languages: impl Into<String>) -> Self {
        self.config.ocr_languages = languages.into();
        self
    }

    pub fn translation_input_budget(mut self, chars: usize) -> Self {
        self.config.translation_input_budget = chars.max(1);
        self
    }

    pub fn summary_bounds(mut self, min_words: usize, max_words: usize) -> Self {
        self.config.summary_min_words = min_words;
        self.config.summary_max_words = max_words;
        self
    }

    pub fn engines(mut self, engines: Arc<EngineSet>) -> Self {
        self.config.engines = engines;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<PipelineConfig, AnuvadError> {
        let c = &self.config;
        if c.source_language.trim().is_empty() || c.target_language.trim().is_empty() {
            return Err(AnuvadError::InvalidConfig(
                "source and target language codes must be non-empty".into(),
            ));
        }
        if c.ocr_languages.trim().is_empty() {
            return Err(AnuvadError::InvalidConfig(
                "OCR language set must be non-empty".into(),
            ));
        }
        if c.summary_min_words >= c.summary_max_words {
            return Err(AnuvadError::InvalidConfig(format!(
                "summary bounds must satisfy min < max, got {}..{}",
                c.summary_min_words, c.summary_max_words
            )));
        }
        Ok(self.config)
    }
}
