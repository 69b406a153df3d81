//! Tesseract OCR over rasterised page images, via `leptess`.
//!
//! The recogniser is parameterised per call with a combined language set in
//! Tesseract notation (`"hin+eng"`), so a single provider instance serves
//! documents that mix the source script with Latin text. Initialisation cost
//! per call is the price of keeping the type `Send + Sync` without a lock
//! around the non-thread-safe Tesseract handle; model loading dominated by
//! page rasterisation anyway.
//!
//! Pages are handed over as in-memory PNGs — lossless, so glyph edges stay
//! crisp for the recogniser.

use crate::engines::OcrEngine;
use crate::error::EngineError;
use image::DynamicImage;
use leptess::LepTess;
use std::io::Cursor;
use std::path::PathBuf;
use tracing::debug;

/// OCR provider backed by the system Tesseract installation.
#[derive(Debug, Clone, Default)]
pub struct TesseractOcr {
    /// Override for the directory containing `*.traineddata` files.
    /// `None` uses Tesseract's own default search path (`TESSDATA_PREFIX`).
    pub tessdata_dir: Option<PathBuf>,
}

impl TesseractOcr {
    pub fn new(tessdata_dir: Option<PathBuf>) -> Self {
        Self { tessdata_dir }
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, page: &DynamicImage, languages: &str) -> Result<String, EngineError> {
        let datapath = self.tessdata_dir.as_ref().map(|p| p.to_string_lossy().to_string());

        let mut engine = LepTess::new(datapath.as_deref(), languages).map_err(|e| {
            EngineError::Unavailable(format!(
                "tesseract init failed for language set '{languages}': {e}"
            ))
        })?;

        let mut png = Vec::new();
        page.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| EngineError::Invocation(format!("page encoding failed: {e}")))?;

        engine
            .set_image_from_mem(&png)
            .map_err(|e| EngineError::Invocation(format!("page handoff failed: {e}")))?;

        let text = engine
            .get_utf8_text()
            .map_err(|e| EngineError::InvalidOutput(format!("recognition failed: {e}")))?;

        debug!(
            languages,
            width = page.width(),
            height = page.height(),
            chars = text.len(),
            "page recognised"
        );
        Ok(text)
    }
}
