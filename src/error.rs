//! Error types for the anuvad library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`AnuvadError`] — **Fatal**: the operation cannot produce anything
//!   meaningful (unreadable input, invalid configuration, a broken render).
//!   Returned as `Err(AnuvadError)` from the functions that can fail this way.
//!
//! * [`StageError`] — **Contained**: a pipeline stage exhausted its preferred
//!   path and its fallback. Stage errors never cross a component boundary;
//!   each component logs them and degrades to an empty-string result, so the
//!   orchestrator's record is always structurally complete.
//!
//! Capability providers (engines) report failures as [`EngineError`], the one
//! error type every trait in [`crate::engines`] returns. Components wrap an
//! `EngineError` in the matching `StageError` variant at their boundary.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the anuvad library.
///
/// Stage-level failures use [`StageError`] and are converted to empty-string
/// results rather than propagated here. Rendering is the exception: a broken
/// render has no degraded form, so it surfaces as [`AnuvadError::Rendering`].
#[derive(Debug, Error)]
pub enum AnuvadError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("file is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// Staging an in-memory document to a temporary file failed.
    #[error("failed to stage document to a temporary file")]
    Staging(#[source] std::io::Error),

    // ── Rendering errors ──────────────────────────────────────────────────
    /// The output document could not be serialised.
    #[error("document rendering failed: {0}")]
    Rendering(String),

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Total failure of one pipeline stage, including exhaustion of its fallback.
///
/// Never escapes the component that produced it: `TextExtractor`,
/// `Translator`, and `Summarizer` each convert these to `""` at their
/// boundary, logging the chain via `tracing`.
#[derive(Debug, Error)]
pub enum StageError {
    /// Native extraction and the OCR fallback both failed.
    #[error("text extraction failed")]
    Extraction(#[source] EngineError),

    /// The preferred translation engine and the hosted fallback both failed.
    #[error("translation failed")]
    Translation(#[source] EngineError),

    /// The abstractive engine failed (the extractive fallback cannot fail).
    #[error("summarization failed")]
    Summarization(#[source] EngineError),
}

/// Failure reported by a single capability provider.
///
/// Providers return this instead of raising through the stack; the cascading
/// strategy executor inspects the tagged result and moves on to the next
/// ranked provider. See the design notes in [`crate::strategy`].
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine is not loaded or not reachable (fixed for process lifetime
    /// when detected at startup).
    #[error("engine unavailable: {0}")]
    Unavailable(String),

    /// The engine was invoked and the call itself failed.
    #[error("engine call failed: {0}")]
    Invocation(String),

    /// The engine answered but the payload could not be used.
    #[error("engine returned unusable output: {0}")]
    InvalidOutput(String),
}
