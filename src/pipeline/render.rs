//! Document rendering: paginate text and serialise it to a PDF buffer.
//!
//! Pagination is deliberately split from serialisation. [`paginate`] is a
//! pure function doing nothing but cursor arithmetic — split on newlines,
//! trim trailing whitespace, advance a vertical cursor one line height per
//! line, open a new page when the cursor has crossed the bottom margin.
//! Page breaks depend on cursor position only, never on semantic grouping
//! (no widow/orphan control), so a given text always produces the same page
//! layout and [`render`] is byte-deterministic.
//!
//! Serialisation uses printpdf's data-oriented API: each page is a list of
//! text ops at absolute positions, assembled into a `PdfDocument` and saved
//! into one buffer. A rendering failure is the one fatal stage failure in
//! the pipeline — a broken buffer has no degraded form.

use crate::error::AnuvadError;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, TextItem,
};
use tracing::debug;

// US letter, portrait.
const PAGE_WIDTH_MM: f32 = 215.9;
const PAGE_HEIGHT_MM: f32 = 279.4;

const FONT_SIZE_PT: f32 = 12.0;
const LINE_HEIGHT_PT: f32 = 14.0;
const LEFT_MARGIN_PT: f32 = 30.0;
/// First baseline, just under the top edge of a 792 pt page.
const TOP_CURSOR_PT: f32 = 750.0;
/// Lines are never placed below this baseline.
const BOTTOM_MARGIN_PT: f32 = 40.0;

/// Split text into pages of lines, by cursor arithmetic alone.
///
/// Always yields at least one page; empty input yields a single page whose
/// only line is empty (and which therefore serialises with no text ops).
pub fn paginate(text: &str) -> Vec<Vec<String>> {
    let mut pages = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut cursor = TOP_CURSOR_PT;

    for line in text.split('\n') {
        if cursor < BOTTOM_MARGIN_PT {
            pages.push(std::mem::take(&mut current));
            cursor = TOP_CURSOR_PT;
        }
        current.push(line.trim_end().to_string());
        cursor -= LINE_HEIGHT_PT;
    }
    pages.push(current);
    pages
}

/// Render `text` into a single PDF buffer of letter-sized pages.
pub fn render(text: &str) -> Result<Vec<u8>, AnuvadError> {
    let pages = paginate(text);
    let (page_w, page_h) = (Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM));

    let mut doc = PdfDocument::new("anuvad document");
    let mut pdf_pages = Vec::with_capacity(pages.len());

    for lines in &pages {
        let mut ops: Vec<Op> = Vec::new();
        let mut cursor = TOP_CURSOR_PT;

        for line in lines {
            if !line.is_empty() {
                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor {
                    pos: Point {
                        x: Pt(LEFT_MARGIN_PT),
                        y: Pt(cursor),
                    },
                });
                ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(FONT_SIZE_PT),
                    font: BuiltinFont::Helvetica,
                });
                ops.push(Op::WriteTextBuiltinFont {
                    items: vec![TextItem::Text(line.clone())],
                    font: BuiltinFont::Helvetica,
                });
                ops.push(Op::EndTextSection);
            }
            cursor -= LINE_HEIGHT_PT;
        }

        pdf_pages.push(PdfPage::new(page_w, page_h, ops));
    }

    let page_count = pdf_pages.len();
    doc.with_pages(pdf_pages);

    let mut warnings: Vec<PdfWarnMsg> = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    if !warnings.is_empty() {
        debug!(count = warnings.len(), "renderer reported warnings");
    }
    if bytes.is_empty() {
        return Err(AnuvadError::Rendering(
            "serialiser produced an empty buffer".into(),
        ));
    }

    debug!(pages = page_count, bytes = bytes.len(), "document rendered");
    Ok(bytes)
}
