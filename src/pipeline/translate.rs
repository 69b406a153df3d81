//! Translation: preferred pair-bound engine, hosted service as fallback.
//!
//! The preferred engine was (or was not) loaded once at process start; a
//! load failure back then means the cascade simply has no first step for
//! the rest of the process — there is no per-request retry of loading. The
//! hosted service takes the explicit target-language code per call.
//!
//! The preferred engine bounds its input to a fixed budget before inference
//! (see [`crate::engines::ollama`]); texts over the budget are passed
//! through bounded, never chunked.

use crate::config::PipelineConfig;
use crate::strategy::{Cascade, Outcome};
use std::sync::Arc;
use tracing::debug;

/// Translate `text` into `target_language`. Returns `""` when the input is
/// empty or both translation paths fail.
pub async fn translate(text: &str, target_language: &str, config: &PipelineConfig) -> String {
    if text.trim().is_empty() {
        debug!("nothing to translate, short-circuiting");
        return String::new();
    }

    let mut cascade = Cascade::new("translation");

    if let Some(engine) = config.engines.neural_translator.as_ref().map(Arc::clone) {
        let input = text.to_string();
        cascade = cascade.step("neural", move || async move {
            Outcome::from_result(engine.translate(&input).await)
        });
    } else {
        debug!("preferred translation engine not loaded for this process, using fallback only");
    }

    if let Some(service) = config.engines.hosted_translator.as_ref().map(Arc::clone) {
        let input = text.to_string();
        let target = target_language.to_string();
        cascade = cascade.step("hosted", move || async move {
            Outcome::from_result(service.translate(&input, &target).await)
        });
    }

    cascade.resolve().await
}
