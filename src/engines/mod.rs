//! Capability providers consumed by the pipeline.
//!
//! The pipeline never talks to pdfium, Tesseract, an inference server, or a
//! hosted translation API directly — it talks to the narrow traits below.
//! Each trait mirrors one opaque capability: a call contract of "text in,
//! text out (or a tagged error)", nothing more. That keeps the core's
//! decision logic (fallback cascades, failure containment, pagination) free
//! of provider detail, and lets tests inject pre-failed or pre-succeeded
//! handles without touching a model or the network.
//!
//! ## Process-wide engine lifecycle
//!
//! [`EngineSet::initialize`] runs once at process start. The preferred
//! translation and summarization engines are probed eagerly; an engine that
//! fails its probe is recorded as `None` and stays that way for the process
//! lifetime — every subsequent run uses the fallback without re-attempting
//! the load. The set is shared immutably (`Arc`) across concurrent runs.

pub mod hosted;
pub mod ollama;
pub mod pdfium;
pub mod tesseract;

use crate::error::EngineError;
use async_trait::async_trait;
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

// ── Capability traits ────────────────────────────────────────────────────

/// Direct parsing of a document's embedded text layers.
pub trait NativeTextSource: Send + Sync {
    /// Return the document's embedded text, pages joined with `\n`.
    /// A document with no text layer yields `Ok("")`, not an error.
    fn text_layer(&self, document: &Path) -> Result<String, EngineError>;
}

/// Rasterisation of every page of a document into images.
pub trait PageRasterizer: Send + Sync {
    /// Render all pages in order. A zero-page document yields an empty vec.
    fn rasterize(&self, document: &Path) -> Result<Vec<DynamicImage>, EngineError>;
}

/// Optical character recognition over one page image.
///
/// `languages` is a combined language-set identifier in Tesseract notation
/// (e.g. `"hin+eng"` — source script plus a Latin-script fallback, since
/// source documents may mix scripts).
pub trait OcrEngine: Send + Sync {
    fn recognize(&self, page: &DynamicImage, languages: &str) -> Result<String, EngineError>;
}

/// The preferred translation engine, bound to a fixed source→target language
/// pair when the engine set is initialized.
///
/// Implementations truncate their input to a fixed budget before inference;
/// longer texts are passed through bounded, never chunked.
#[async_trait]
pub trait NeuralTranslator: Send + Sync {
    async fn translate(&self, text: &str) -> Result<String, EngineError>;
}

/// General-purpose hosted translation, taking an explicit target-language code.
#[async_trait]
pub trait HostedTranslator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str)
        -> Result<String, EngineError>;
}

/// Abstractive summarization bounded by minimum/maximum output length.
#[async_trait]
pub trait AbstractiveSummarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        min_words: usize,
        max_words: usize,
    ) -> Result<String, EngineError>;
}

// ── Engine set ───────────────────────────────────────────────────────────

/// The full complement of capability providers for a process.
///
/// Document-local capabilities (`native`, `rasterizer`, `ocr`) are always
/// present; their failures are per-call and contained by the extractor. The
/// model-backed engines are `Option`: `None` records a load failure (or a
/// deliberately degraded setup) and routes the stage straight to its
/// fallback.
#[derive(Clone)]
pub struct EngineSet {
    pub native: Arc<dyn NativeTextSource>,
    pub rasterizer: Arc<dyn PageRasterizer>,
    pub ocr: Arc<dyn OcrEngine>,
    pub neural_translator: Option<Arc<dyn NeuralTranslator>>,
    pub hosted_translator: Option<Arc<dyn HostedTranslator>>,
    pub abstractive: Option<Arc<dyn AbstractiveSummarizer>>,
}

impl std::fmt::Debug for EngineSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSet")
            .field("neural_translator", &self.neural_translator.as_ref().map(|_| "loaded"))
            .field("hosted_translator", &self.hosted_translator.as_ref().map(|_| "loaded"))
            .field("abstractive", &self.abstractive.as_ref().map(|_| "loaded"))
            .finish()
    }
}

impl EngineSet {
    /// Build the process-wide engine set, probing the preferred engines once.
    ///
    /// Never fails: an engine that cannot be loaded is logged and recorded as
    /// absent, which fixes the fallback route for the process lifetime.
    pub async fn initialize(options: &EngineOptions) -> Self {
        let neural_translator: Option<Arc<dyn NeuralTranslator>> =
            match ollama::InferenceTranslator::connect(options).await {
                Ok(engine) => {
                    info!(model = %options.translation_model, "translation engine loaded");
                    Some(Arc::new(engine))
                }
                Err(err) => {
                    warn!(error = %err, "translation engine unavailable, hosted fallback is permanent for this process");
                    None
                }
            };

        let abstractive: Option<Arc<dyn AbstractiveSummarizer>> =
            match ollama::InferenceSummarizer::connect(options).await {
                Ok(engine) => {
                    info!(model = %options.summary_model, "summarization engine loaded");
                    Some(Arc::new(engine))
                }
                Err(err) => {
                    warn!(error = %err, "summarization engine unavailable, extractive fallback is permanent for this process");
                    None
                }
            };

        let hosted_translator: Option<Arc<dyn HostedTranslator>> =
            match hosted::HostedTranslateClient::new(options) {
                Ok(client) => Some(Arc::new(client)),
                Err(err) => {
                    warn!(error = %err, "hosted translation client could not be built");
                    None
                }
            };

        Self {
            native: Arc::new(pdfium::PdfiumSource::default()),
            rasterizer: Arc::new(pdfium::PdfiumSource::default()),
            ocr: Arc::new(tesseract::TesseractOcr::new(options.tessdata_dir.clone())),
            neural_translator,
            hosted_translator,
            abstractive,
        }
    }

    /// Document-local capabilities only: pdfium and Tesseract, no network
    /// engines. Translation degrades to `""`, summaries to the extractive
    /// heuristic. This is the `Default` configuration's engine set.
    pub fn local_only() -> Self {
        Self {
            native: Arc::new(pdfium::PdfiumSource::default()),
            rasterizer: Arc::new(pdfium::PdfiumSource::default()),
            ocr: Arc::new(tesseract::TesseractOcr::new(None)),
            neural_translator: None,
            hosted_translator: None,
            abstractive: None,
        }
    }
}

// ── Engine options ───────────────────────────────────────────────────────

/// Connection settings consumed once by [`EngineSet::initialize`].
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Base URL of the local inference server hosting the preferred engines.
    pub inference_host: String,
    /// Model used for translation, bound to `source_language`→`target_language`.
    pub translation_model: String,
    /// Model used for abstractive summarization.
    pub summary_model: String,
    /// Source-language code the translation engine is bound to.
    pub source_language: String,
    /// Target-language code the translation engine is bound to.
    pub target_language: String,
    /// Character budget applied to translation input before inference.
    pub translation_input_budget: usize,
    /// Base URL of the hosted translation service (LibreTranslate-compatible).
    pub hosted_endpoint: String,
    /// Optional API key for the hosted translation service.
    pub hosted_api_key: Option<String>,
    /// Override for the Tesseract data directory.
    pub tessdata_dir: Option<PathBuf>,
    /// Timeout for every HTTP capability call.
    pub http_timeout_secs: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            inference_host: "http://localhost:11434".to_string(),
            translation_model: "aya:8b".to_string(),
            summary_model: "llama3.2:3b".to_string(),
            source_language: "hi".to_string(),
            target_language: "en".to_string(),
            translation_input_budget: crate::config::DEFAULT_TRANSLATION_INPUT_BUDGET,
            hosted_endpoint: "http://localhost:5000".to_string(),
            hosted_api_key: None,
            tessdata_dir: None,
            http_timeout_secs: 60,
        }
    }
}

impl EngineOptions {
    /// Read options from `ANUVAD_*` environment variables, falling back to
    /// the defaults above for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let var = |name: &str, fallback: String| -> String {
            std::env::var(name).ok().filter(|v| !v.is_empty()).unwrap_or(fallback)
        };
        Self {
            inference_host: var("ANUVAD_INFERENCE_HOST", defaults.inference_host),
            translation_model: var("ANUVAD_TRANSLATION_MODEL", defaults.translation_model),
            summary_model: var("ANUVAD_SUMMARY_MODEL", defaults.summary_model),
            source_language: var("ANUVAD_SOURCE_LANGUAGE", defaults.source_language),
            target_language: var("ANUVAD_TARGET_LANGUAGE", defaults.target_language),
            translation_input_budget: defaults.translation_input_budget,
            hosted_endpoint: var("ANUVAD_TRANSLATE_URL", defaults.hosted_endpoint),
            hosted_api_key: std::env::var("ANUVAD_TRANSLATE_API_KEY")
                .ok()
                .filter(|v| !v.is_empty()),
            tessdata_dir: std::env::var("ANUVAD_TESSDATA_DIR")
                .ok()
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            http_timeout_secs: defaults.http_timeout_secs,
        }
    }
}
