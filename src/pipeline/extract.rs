//! Text extraction: native text layer first, OCR as fallback.
//!
//! ## Decision ladder
//!
//! 1. Read the embedded text layer. Present and non-blank → done; this is
//!    the terminal success path and OCR never runs.
//! 2. Layer blank, *or* the native read itself failed (malformed document,
//!    unreadable stream) → rasterise every page and run OCR per page with
//!    the configured dual-script language set, joining page texts with `\n`.
//! 3. The OCR path failing too degrades to an empty string. No error ever
//!    escapes this component.
//!
//! Rasterising a long document costs memory and time proportional to its
//! page count; that is an accepted cost here, not something this stage
//! optimises.
//!
//! pdfium and Tesseract are blocking C libraries, so both paths run inside
//! `tokio::task::spawn_blocking`.

use crate::config::PipelineConfig;
use crate::error::{EngineError, StageError};
use crate::pipeline::input::StagedDocument;
use crate::pipeline::normalize;
use std::sync::Arc;
use tracing::{info, warn};

/// Extract text from the document. Returns `""` on total failure.
pub async fn extract(document: &StagedDocument, config: &PipelineConfig) -> String {
    let path = document.path().to_path_buf();

    let native = Arc::clone(&config.engines.native);
    let native_result = tokio::task::spawn_blocking(move || native.text_layer(&path))
        .await
        .map_err(|e| EngineError::Invocation(format!("extraction task panicked: {e}")))
        .and_then(|result| result);

    match native_result {
        Ok(text) if !text.trim().is_empty() => {
            info!(chars = text.len(), "native text layer present, OCR skipped");
            return normalize::clean_text(&text);
        }
        Ok(_) => {
            info!("text layer blank, falling back to OCR");
        }
        Err(err) => {
            warn!(error = %StageError::Extraction(err), "native extraction failed, attempting OCR recovery");
        }
    }

    match ocr_document(document, config).await {
        Ok(text) => {
            info!(chars = text.len(), "OCR fallback complete");
            normalize::clean_text(&text)
        }
        Err(err) => {
            warn!(error = %StageError::Extraction(err), "OCR fallback failed, extraction degraded to empty");
            String::new()
        }
    }
}

/// Rasterise every page and recognise each one, joining results with `\n`.
///
/// Any failure — rasterisation or a single page's recognition — fails the
/// whole OCR path; a partially-recognised document has no meaningful place
/// in a single-string result.
async fn ocr_document(
    document: &StagedDocument,
    config: &PipelineConfig,
) -> Result<String, EngineError> {
    let path = document.path().to_path_buf();
    let rasterizer = Arc::clone(&config.engines.rasterizer);
    let ocr = Arc::clone(&config.engines.ocr);
    let languages = config.ocr_languages.clone();

    tokio::task::spawn_blocking(move || {
        let pages = rasterizer.rasterize(&path)?;
        info!(pages = pages.len(), languages = %languages, "recognising rasterised pages");

        let mut page_texts = Vec::with_capacity(pages.len());
        for page in &pages {
            page_texts.push(ocr.recognize(page, &languages)?);
        }
        Ok(page_texts.join("\n"))
    })
    .await
    .map_err(|e| EngineError::Invocation(format!("OCR task panicked: {e}")))?
}
