//! Output types returned by a pipeline run.
//!
//! [`PipelineOutput`] is deliberately total: every field is always present,
//! and a stage that failed (preferred path and fallback both exhausted)
//! contributes an empty string rather than an error value. Callers that need
//! to distinguish "stage produced nothing" check `is_empty()` on the field;
//! there is no error channel to inspect.

use serde::{Deserialize, Serialize};

/// The four-field result record of one pipeline run, plus run statistics.
///
/// Serialises cleanly to JSON for transport layers:
///
/// ```json
/// {
///   "source_text": "…",
///   "target_text": "…",
///   "source_summary": "…",
///   "target_summary": "…",
///   "stats": { "extract_ms": 412, … }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOutput {
    /// Text extracted from the document, in the source language.
    /// Empty if both native extraction and the OCR fallback failed.
    pub source_text: String,

    /// `source_text` translated to the configured target language.
    /// Empty if the input was empty or both translation paths failed.
    pub target_text: String,

    /// Summary of the source text. Empty only if `source_text` is empty.
    pub source_summary: String,

    /// Summary of the translated text. Empty only if `target_text` is empty.
    pub target_summary: String,

    /// Wall-clock timings for the run.
    pub stats: RunStats,
}

impl PipelineOutput {
    /// A structurally complete record with every content field empty.
    ///
    /// Used when the document could not even be staged: the orchestrator's
    /// contract is total, so an unreadable input degrades to this rather
    /// than an error.
    pub fn degraded(stats: RunStats) -> Self {
        Self {
            source_text: String::new(),
            target_text: String::new(),
            source_summary: String::new(),
            target_summary: String::new(),
            stats,
        }
    }
}

/// Per-stage and total wall-clock durations for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Time spent in text extraction (native attempt + OCR fallback).
    pub extract_ms: u64,
    /// Time spent translating.
    pub translate_ms: u64,
    /// Time spent producing both summaries.
    pub summarize_ms: u64,
    /// End-to-end time including staging.
    pub total_ms: u64,
}
