//! # anuvad
//!
//! Translate, summarise, and re-render scanned PDF documents.
//!
//! ## Why this crate?
//!
//! Scanned government and legal documents rarely carry a usable text layer,
//! and the services that can read, translate, or summarise them fail
//! independently and often. Instead of surfacing every transient failure to
//! the caller, this crate runs a fixed pipeline in which every stage has a
//! ranked fallback and degrades to an empty result rather than erroring —
//! the caller always receives a structurally complete record.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Stage      validate magic bytes, pin to a local file
//!  ├─ 2. Extract    embedded text layer, else rasterise + OCR per page
//!  ├─ 3. Translate  pair-bound neural engine, else hosted service
//!  ├─ 4. Summarise  abstractive engine, else extractive heuristic
//!  └─ 5. Output     { source_text, target_text, source_summary, target_summary }
//!
//! text ─▶ Render    cursor-arithmetic pagination ─▶ letter-sized PDF buffer
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use anuvad::{process, EngineOptions, EngineSet, PipelineConfig};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Probe the preferred engines once; a failed probe fixes the
//!     // fallback route for the process lifetime.
//!     let engines = EngineSet::initialize(&EngineOptions::from_env()).await;
//!     let config = PipelineConfig::builder()
//!         .engines(Arc::new(engines))
//!         .build()?;
//!
//!     let output = process("document.pdf", &config).await;
//!     println!("{}", serde_json::to_string_pretty(&output)?);
//!
//!     let pdf = anuvad::render(&output.target_text)?;
//!     std::fs::write("translated.pdf", pdf)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Degradation, not errors
//!
//! | Stage | Preferred | Fallback | On total failure |
//! |-------|-----------|----------|------------------|
//! | Extract | embedded text layer | per-page OCR | `""` |
//! | Translate | pair-bound neural engine | hosted service | `""` |
//! | Summarise | abstractive engine | extractive heuristic | `""` (empty input only) |
//! | Render | — | — | `Err` (fatal; no degraded form) |
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `anuvad` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod engines;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod strategy;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PipelineConfig, PipelineConfigBuilder, DEFAULT_TRANSLATION_INPUT_BUDGET};
pub use engines::{
    AbstractiveSummarizer, EngineOptions, EngineSet, HostedTranslator, NativeTextSource,
    NeuralTranslator, OcrEngine, PageRasterizer,
};
pub use error::{AnuvadError, EngineError, StageError};
pub use output::{PipelineOutput, RunStats};
pub use pipeline::input::{stage_bytes, stage_path, StagedDocument};
pub use pipeline::render::paginate;
pub use pipeline::summarize::{SOURCE_SUMMARY_SENTENCES, TARGET_SUMMARY_SENTENCES};
pub use process::{process, process_bytes, process_sync, render};
pub use strategy::{Cascade, Outcome};
