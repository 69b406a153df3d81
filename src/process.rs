//! End-to-end pipeline entry points.
//!
//! ## Totality
//!
//! [`process`] and [`process_bytes`] never fail: for any input — corrupted,
//! encrypted, empty, or not a PDF at all — they return a structurally
//! complete [`PipelineOutput`] whose unfillable fields are empty strings.
//! Every stage already contains its own failures, and staging failures are
//! degraded here after logging. The one operation with a real error channel
//! is [`render`]: a broken render has no meaningful degraded form.
//!
//! ## Sequence
//!
//! extract → translate(extracted) → summarize(extracted) and
//! summarize(translated). The source summary does not depend on translation;
//! both summaries run off their own text. Control flow is single-pass and
//! strictly sequential — no stage re-invokes an earlier one, and no internal
//! parallelism exists across pages, stages, or documents.
//!
//! Any resource acquired for a run (the staged copy of an uploaded
//! document) is dropped on every exit path; nothing is retained between
//! runs.

use crate::config::PipelineConfig;
use crate::error::AnuvadError;
use crate::output::{PipelineOutput, RunStats};
use crate::pipeline::summarize::{SOURCE_SUMMARY_SENTENCES, TARGET_SUMMARY_SENTENCES};
use crate::pipeline::{extract, input, render as render_stage, summarize, translate};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Process a document from a local path.
///
/// This is the primary entry point for the library.
pub async fn process(path: impl AsRef<Path>, config: &PipelineConfig) -> PipelineOutput {
    let total_start = Instant::now();
    let path = path.as_ref();
    info!("starting pipeline run: {}", path.display());

    let staged = match input::stage_path(path) {
        Ok(staged) => staged,
        Err(err) => {
            warn!(error = %err, "document could not be staged, degrading to empty record");
            return PipelineOutput::degraded(RunStats {
                total_ms: total_start.elapsed().as_millis() as u64,
                ..RunStats::default()
            });
        }
    };

    // `staged` drops (and any temp file is deleted) when this returns.
    run_staged(&staged, config, total_start).await
}

/// Process a document supplied as in-memory bytes.
///
/// The bytes are staged to a managed temp file which is deleted when the run
/// finishes, on every exit path. This is the recommended entry point when
/// the document comes from an upload or a database rather than disk.
pub async fn process_bytes(bytes: &[u8], config: &PipelineConfig) -> PipelineOutput {
    let total_start = Instant::now();
    info!(bytes = bytes.len(), "starting pipeline run from bytes");

    let staged = match input::stage_bytes(bytes) {
        Ok(staged) => staged,
        Err(err) => {
            warn!(error = %err, "bytes could not be staged, degrading to empty record");
            return PipelineOutput::degraded(RunStats {
                total_ms: total_start.elapsed().as_millis() as u64,
                ..RunStats::default()
            });
        }
    };

    run_staged(&staged, config, total_start).await
}

/// Synchronous wrapper around [`process`].
///
/// Creates a temporary tokio runtime internally.
pub fn process_sync(
    path: impl AsRef<Path>,
    config: &PipelineConfig,
) -> Result<PipelineOutput, AnuvadError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| AnuvadError::Internal(format!("failed to create tokio runtime: {e}")))
        .map(|rt| rt.block_on(process(path, config)))
}

/// Render text into a paginated PDF buffer (the standalone rendering path).
pub fn render(text: &str) -> Result<Vec<u8>, AnuvadError> {
    render_stage::render(text)
}

// ── Internal ─────────────────────────────────────────────────────────────

async fn run_staged(
    staged: &input::StagedDocument,
    config: &PipelineConfig,
    total_start: Instant,
) -> PipelineOutput {
    let stage_start = Instant::now();
    let source_text = extract::extract(staged, config).await;
    let extract_ms = stage_start.elapsed().as_millis() as u64;

    let stage_start = Instant::now();
    let target_text = translate::translate(&source_text, &config.target_language, config).await;
    let translate_ms = stage_start.elapsed().as_millis() as u64;

    let stage_start = Instant::now();
    let source_summary = summarize::summarize(&source_text, SOURCE_SUMMARY_SENTENCES, config).await;
    let target_summary = summarize::summarize(&target_text, TARGET_SUMMARY_SENTENCES, config).await;
    let summarize_ms = stage_start.elapsed().as_millis() as u64;

    let stats = RunStats {
        extract_ms,
        translate_ms,
        summarize_ms,
        total_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        source_chars = source_text.len(),
        target_chars = target_text.len(),
        total_ms = stats.total_ms,
        "pipeline run complete"
    );

    PipelineOutput {
        source_text,
        target_text,
        source_summary,
        target_summary,
        stats,
    }
}
