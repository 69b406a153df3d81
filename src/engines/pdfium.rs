//! pdfium-backed document capabilities: embedded text layers and page
//! rasterisation.
//!
//! ## Why cap pixels, not DPI?
//!
//! Page sizes vary wildly: an A0 poster rasterised at a fixed DPI can produce
//! a 13 000 × 18 000 px image and exhaust memory before OCR even starts.
//! `max_rendered_pixels` caps the longest edge regardless of physical size,
//! keeping memory bounded while staying comfortably above what Tesseract
//! needs for body text.
//!
//! All methods are blocking — pdfium wraps a C++ library with thread-local
//! state that must not be driven from async contexts. The extractor calls
//! these through `tokio::task::spawn_blocking`.

use crate::error::EngineError;
use crate::engines::{NativeTextSource, PageRasterizer};
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::Path;
use tracing::debug;

/// Document reader backed by the pdfium library.
///
/// Stateless: every call binds the library and opens the document afresh, so
/// the type is trivially shareable across runs.
#[derive(Debug, Clone)]
pub struct PdfiumSource {
    /// Maximum rendered image dimension (width or height) in pixels.
    pub max_rendered_pixels: u32,
}

impl Default for PdfiumSource {
    fn default() -> Self {
        Self {
            max_rendered_pixels: 2000,
        }
    }
}

impl PdfiumSource {
    pub fn new(max_rendered_pixels: u32) -> Self {
        Self {
            max_rendered_pixels: max_rendered_pixels.max(100),
        }
    }

    /// Bind to a pdfium library next to the executable, falling back to the
    /// system library.
    fn bind() -> Result<Pdfium, EngineError> {
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map(Pdfium::new)
            .map_err(|e| EngineError::Unavailable(format!("pdfium binding failed: {e:?}")))
    }

    fn open<'a>(pdfium: &'a Pdfium, document: &Path) -> Result<PdfDocument<'a>, EngineError> {
        pdfium
            .load_pdf_from_file(document, None)
            .map_err(|e| EngineError::Invocation(format!("cannot open '{}': {e:?}", document.display())))
    }
}

impl NativeTextSource for PdfiumSource {
    fn text_layer(&self, document: &Path) -> Result<String, EngineError> {
        let pdfium = Self::bind()?;
        let doc = Self::open(&pdfium, document)?;

        let mut pages_text = Vec::with_capacity(doc.pages().len() as usize);
        for page in doc.pages().iter() {
            let text = page
                .text()
                .map_err(|e| EngineError::Invocation(format!("text layer read failed: {e:?}")))?;
            pages_text.push(text.all());
        }

        let joined = pages_text.join("\n");
        debug!(pages = pages_text.len(), chars = joined.len(), "text layer read");
        Ok(joined)
    }
}

impl PageRasterizer for PdfiumSource {
    fn rasterize(&self, document: &Path) -> Result<Vec<DynamicImage>, EngineError> {
        let pdfium = Self::bind()?;
        let doc = Self::open(&pdfium, document)?;

        let render_config = PdfRenderConfig::new()
            .set_target_width(self.max_rendered_pixels as i32)
            .set_maximum_height(self.max_rendered_pixels as i32);

        let pages = doc.pages();
        let mut images = Vec::with_capacity(pages.len() as usize);
        for (index, page) in pages.iter().enumerate() {
            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                EngineError::Invocation(format!("rasterisation failed for page {}: {e:?}", index + 1))
            })?;
            let image = bitmap.as_image();
            debug!(page = index + 1, width = image.width(), height = image.height(), "page rasterised");
            images.push(image);
        }

        Ok(images)
    }
}
