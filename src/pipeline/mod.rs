//! Pipeline stages for document translation and re-rendering.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets us swap capability
//! providers (a different OCR engine, a different hosted service) without
//! touching other stages.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ extract ──▶ translate ──▶ summarize ──▶ render
//! (stage)  (text layer   (neural +     (abstractive   (paginate +
//!           or OCR)       hosted)       or extractive)  serialise)
//! ```
//!
//! 1. [`input`]     — validate and stage the document to a local file
//! 2. [`extract`]   — embedded text layer, OCR per page as fallback
//! 3. [`normalize`] — deterministic cleanup of extraction artifacts
//! 4. [`translate`] — preferred pair-bound engine, hosted fallback
//! 5. [`summarize`] — abstractive engine, extractive heuristic fallback
//! 6. [`render`]    — cursor-arithmetic pagination, PDF serialisation
//!
//! Stages 2–5 contain their own failures (empty-string degradation); only
//! rendering surfaces an error, because a broken buffer has no usable
//! degraded form.

pub mod extract;
pub mod input;
pub mod normalize;
pub mod render;
pub mod summarize;
pub mod translate;
