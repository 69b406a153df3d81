//! Integration tests for the anuvad pipeline.
//!
//! Every capability is stubbed: no pdfium, no Tesseract, no network. The
//! engine handles are injected through `EngineSet` exactly the way a
//! process start would install the real providers, which lets these tests
//! pin the cascade and containment behaviour — which path ran, which was
//! skipped, and what the caller sees when everything fails.

use anuvad::{
    paginate, process, process_bytes, render, stage_bytes, AbstractiveSummarizer, EngineError,
    EngineSet, HostedTranslator, NativeTextSource, NeuralTranslator, OcrEngine, PageRasterizer,
    PipelineConfig, SOURCE_SUMMARY_SENTENCES, TARGET_SUMMARY_SENTENCES,
};
use async_trait::async_trait;
use image::{DynamicImage, Rgba, RgbaImage};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// ── Stub capability providers ────────────────────────────────────────────

struct StaticText(&'static str);

impl NativeTextSource for StaticText {
    fn text_layer(&self, _document: &Path) -> Result<String, EngineError> {
        Ok(self.0.to_string())
    }
}

struct FailingNative;

impl NativeTextSource for FailingNative {
    fn text_layer(&self, _document: &Path) -> Result<String, EngineError> {
        Err(EngineError::Invocation("malformed xref table".into()))
    }
}

struct FixedPages(usize);

impl PageRasterizer for FixedPages {
    fn rasterize(&self, _document: &Path) -> Result<Vec<DynamicImage>, EngineError> {
        let page = DynamicImage::ImageRgba8(RgbaImage::from_pixel(8, 8, Rgba([255; 4])));
        Ok(vec![page; self.0])
    }
}

struct FailingRasterizer;

impl PageRasterizer for FailingRasterizer {
    fn rasterize(&self, _document: &Path) -> Result<Vec<DynamicImage>, EngineError> {
        Err(EngineError::Invocation("render glitch".into()))
    }
}

/// Returns a scripted text per page, counting invocations.
struct ScriptedOcr {
    pages: Vec<&'static str>,
    calls: Arc<AtomicUsize>,
}

impl OcrEngine for ScriptedOcr {
    fn recognize(&self, _page: &DynamicImage, languages: &str) -> Result<String, EngineError> {
        assert_eq!(languages, "hin+eng", "extractor must pass the configured language set");
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.pages[index % self.pages.len()].to_string())
    }
}

struct FailingOcr {
    calls: Arc<AtomicUsize>,
}

impl OcrEngine for FailingOcr {
    fn recognize(&self, _page: &DynamicImage, _languages: &str) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EngineError::Invocation("recogniser crashed".into()))
    }
}

struct StubNeural {
    reply: &'static str,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl NeuralTranslator for StubNeural {
    async fn translate(&self, _text: &str) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_string())
    }
}

struct FailingNeural {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl NeuralTranslator for FailingNeural {
    async fn translate(&self, _text: &str) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(EngineError::Invocation("inference timed out".into()))
    }
}

struct StubHosted {
    reply: &'static str,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl HostedTranslator for StubHosted {
    async fn translate(&self, _text: &str, target: &str) -> Result<String, EngineError> {
        assert_eq!(target, "en", "translator must pass the configured target code");
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.to_string())
    }
}

struct FailingHosted;

#[async_trait]
impl HostedTranslator for FailingHosted {
    async fn translate(&self, _text: &str, _target: &str) -> Result<String, EngineError> {
        Err(EngineError::Unavailable("service unreachable".into()))
    }
}

struct StubAbstractive {
    reply: &'static str,
}

#[async_trait]
impl AbstractiveSummarizer for StubAbstractive {
    async fn summarize(
        &self,
        _text: &str,
        _min_words: usize,
        _max_words: usize,
    ) -> Result<String, EngineError> {
        Ok(self.reply.to_string())
    }
}

struct FailingAbstractive;

#[async_trait]
impl AbstractiveSummarizer for FailingAbstractive {
    async fn summarize(
        &self,
        _text: &str,
        _min_words: usize,
        _max_words: usize,
    ) -> Result<String, EngineError> {
        Err(EngineError::Invocation("model rejected input".into()))
    }
}

// ── Test helpers ─────────────────────────────────────────────────────────

/// A document-local engine set with no model engines installed.
fn engine_set(
    native: Arc<dyn NativeTextSource>,
    rasterizer: Arc<dyn PageRasterizer>,
    ocr: Arc<dyn OcrEngine>,
) -> EngineSet {
    EngineSet {
        native,
        rasterizer,
        ocr,
        neural_translator: None,
        hosted_translator: None,
        abstractive: None,
    }
}

fn config_with(engines: EngineSet) -> PipelineConfig {
    PipelineConfig::builder()
        .engines(Arc::new(engines))
        .build()
        .expect("valid config")
}

/// Minimal byte buffer that passes magic-byte staging.
const FAKE_PDF: &[u8] = b"%PDF-1.7\n%stub document body";

// ── Extraction ───────────────────────────────────────────────────────────

#[tokio::test]
async fn embedded_text_layer_is_returned_verbatim_without_ocr() {
    let ocr_calls = Arc::new(AtomicUsize::new(0));
    let config = config_with(engine_set(
        Arc::new(StaticText("Hello. World. Third sentence.")),
        Arc::new(FixedPages(3)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::clone(&ocr_calls),
        }),
    ));

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.source_text, "Hello. World. Third sentence.");
    assert_eq!(ocr_calls.load(Ordering::SeqCst), 0, "OCR must not run when the layer is present");
}

#[tokio::test]
async fn blank_text_layer_falls_back_to_per_page_ocr() {
    let ocr_calls = Arc::new(AtomicUsize::new(0));
    let config = config_with(engine_set(
        Arc::new(StaticText("   \n \t ")),
        Arc::new(FixedPages(3)),
        Arc::new(ScriptedOcr {
            pages: vec!["पहला पृष्ठ", "दूसरा पृष्ठ", "page three"],
            calls: Arc::clone(&ocr_calls),
        }),
    ));

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.source_text, "पहला पृष्ठ\nदूसरा पृष्ठ\npage three");
    assert_eq!(ocr_calls.load(Ordering::SeqCst), 3, "one OCR call per rasterised page");
}

#[tokio::test]
async fn native_extraction_error_recovers_through_ocr() {
    let ocr_calls = Arc::new(AtomicUsize::new(0));
    let config = config_with(engine_set(
        Arc::new(FailingNative),
        Arc::new(FixedPages(2)),
        Arc::new(ScriptedOcr {
            pages: vec!["recovered one", "recovered two"],
            calls: Arc::clone(&ocr_calls),
        }),
    ));

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.source_text, "recovered one\nrecovered two");
    assert_eq!(ocr_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn extraction_degrades_to_empty_when_both_paths_fail() {
    let ocr_calls = Arc::new(AtomicUsize::new(0));
    let config = config_with(engine_set(
        Arc::new(FailingNative),
        Arc::new(FixedPages(2)),
        Arc::new(FailingOcr {
            calls: Arc::clone(&ocr_calls),
        }),
    ));

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.source_text, "");
    assert_eq!(output.target_text, "");
    assert_eq!(output.source_summary, "");
    assert_eq!(output.target_summary, "");
}

#[tokio::test]
async fn rasterizer_failure_is_contained_too() {
    let config = config_with(engine_set(
        Arc::new(FailingNative),
        Arc::new(FailingRasterizer),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    ));

    let output = process_bytes(FAKE_PDF, &config).await;
    assert_eq!(output.source_text, "");
}

// ── Translation cascade ──────────────────────────────────────────────────

#[tokio::test]
async fn preferred_translation_engine_wins_and_hosted_is_skipped() {
    let neural_calls = Arc::new(AtomicUsize::new(0));
    let hosted_calls = Arc::new(AtomicUsize::new(0));

    let mut engines = engine_set(
        Arc::new(StaticText("यह एक परीक्षण है।")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    engines.neural_translator = Some(Arc::new(StubNeural {
        reply: "This is a test.",
        calls: Arc::clone(&neural_calls),
    }));
    engines.hosted_translator = Some(Arc::new(StubHosted {
        reply: "unused",
        calls: Arc::clone(&hosted_calls),
    }));
    let config = config_with(engines);

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.target_text, "This is a test.");
    assert_eq!(neural_calls.load(Ordering::SeqCst), 1);
    assert_eq!(hosted_calls.load(Ordering::SeqCst), 0, "fallback must not run after a success");
}

#[tokio::test]
async fn failed_preferred_engine_falls_back_to_hosted_service() {
    let neural_calls = Arc::new(AtomicUsize::new(0));
    let hosted_calls = Arc::new(AtomicUsize::new(0));

    let mut engines = engine_set(
        Arc::new(StaticText("यह एक परीक्षण है।")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    engines.neural_translator = Some(Arc::new(FailingNeural {
        calls: Arc::clone(&neural_calls),
    }));
    engines.hosted_translator = Some(Arc::new(StubHosted {
        reply: "hosted translation",
        calls: Arc::clone(&hosted_calls),
    }));
    let config = config_with(engines);

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.target_text, "hosted translation");
    assert_eq!(neural_calls.load(Ordering::SeqCst), 1);
    assert_eq!(hosted_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unloaded_preferred_engine_routes_straight_to_hosted() {
    let hosted_calls = Arc::new(AtomicUsize::new(0));

    let mut engines = engine_set(
        Arc::new(StaticText("कुछ पाठ।")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    engines.hosted_translator = Some(Arc::new(StubHosted {
        reply: "some text",
        calls: Arc::clone(&hosted_calls),
    }));
    let config = config_with(engines);

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.target_text, "some text");
    assert_eq!(hosted_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn translation_is_empty_only_when_both_paths_fail() {
    let mut engines = engine_set(
        Arc::new(StaticText("कुछ पाठ।")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    engines.neural_translator = Some(Arc::new(FailingNeural {
        calls: Arc::new(AtomicUsize::new(0)),
    }));
    engines.hosted_translator = Some(Arc::new(FailingHosted));
    let config = config_with(engines);

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.target_text, "");
    assert!(!output.source_text.is_empty(), "extraction is independent of translation");
}

// ── Summarization cascade ────────────────────────────────────────────────

#[tokio::test]
async fn abstractive_summary_is_preferred_when_loaded() {
    let mut engines = engine_set(
        Arc::new(StaticText("One. Two. Three. Four. Five.")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    engines.abstractive = Some(Arc::new(StubAbstractive {
        reply: "A condensed account.",
    }));
    let config = config_with(engines);

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.source_summary, "A condensed account.");
}

#[tokio::test]
async fn failed_abstractive_engine_falls_back_to_extractive_heuristic() {
    let mut engines = engine_set(
        Arc::new(StaticText("One. Two. Three. Four. Five.")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    engines.abstractive = Some(Arc::new(FailingAbstractive));
    let config = config_with(engines);

    let output = process_bytes(FAKE_PDF, &config).await;

    // Source site keeps the three-sentence budget.
    assert_eq!(output.source_summary, "One. Two. Three...");
}

// ── End-to-end scenarios ─────────────────────────────────────────────────

#[tokio::test]
async fn degraded_run_keeps_source_fields_and_empties_target_fields() {
    // Extractable layer, translation fully unavailable.
    let mut engines = engine_set(
        Arc::new(StaticText("Hello. World. Third sentence.")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    );
    engines.hosted_translator = Some(Arc::new(FailingHosted));
    let config = config_with(engines);

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.source_text, "Hello. World. Third sentence.");
    assert_eq!(output.target_text, "");
    // Three sentences within the three-sentence source budget: unchanged.
    assert_eq!(output.source_summary, "Hello. World. Third sentence.");
    assert_eq!(output.target_summary, "");
}

#[tokio::test]
async fn zero_page_document_degrades_every_field_to_empty() {
    let ocr_calls = Arc::new(AtomicUsize::new(0));
    let config = config_with(engine_set(
        Arc::new(StaticText("")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::clone(&ocr_calls),
        }),
    ));

    let output = process_bytes(FAKE_PDF, &config).await;

    assert_eq!(output.source_text, "");
    assert_eq!(output.target_text, "");
    assert_eq!(output.source_summary, "");
    assert_eq!(output.target_summary, "");
    assert_eq!(ocr_calls.load(Ordering::SeqCst), 0, "no pages, no OCR calls");

    // The standalone render path still produces a single empty page.
    let pages = paginate("");
    assert_eq!(pages.len(), 1);
    assert!(pages[0].iter().all(|line| line.is_empty()));
    assert!(render("").expect("render").starts_with(b"%PDF"));
}

// ── Totality ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn unreadable_path_still_yields_a_complete_record() {
    let config = config_with(engine_set(
        Arc::new(StaticText("unused")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    ));

    let output = process("/definitely/not/a/real/file.pdf", &config).await;

    assert_eq!(output.source_text, "");
    assert_eq!(output.target_text, "");
    assert_eq!(output.source_summary, "");
    assert_eq!(output.target_summary, "");
}

#[tokio::test]
async fn non_pdf_bytes_still_yield_a_complete_record() {
    let config = config_with(engine_set(
        Arc::new(StaticText("unused")),
        Arc::new(FixedPages(0)),
        Arc::new(ScriptedOcr {
            pages: vec!["unused"],
            calls: Arc::new(AtomicUsize::new(0)),
        }),
    ));

    let output = process_bytes(b"PK\x03\x04 this is a zip", &config).await;

    assert_eq!(output.source_text, "");
    assert_eq!(output.target_text, "");
}

// ── Staging / rendering round trips ──────────────────────────────────────

#[test]
fn staged_bytes_expose_a_readable_path() {
    let staged = stage_bytes(FAKE_PDF).expect("staging");
    let on_disk = std::fs::read(staged.path()).expect("read staged file");
    assert_eq!(on_disk, FAKE_PDF);
}

#[test]
fn summary_budget_constants_stay_distinct() {
    // Two call sites, two budgets; unifying them silently would change the
    // target summary's length.
    assert_eq!(SOURCE_SUMMARY_SENTENCES, 3);
    assert_eq!(TARGET_SUMMARY_SENTENCES, 2);
    assert_ne!(SOURCE_SUMMARY_SENTENCES, TARGET_SUMMARY_SENTENCES);
}
