//! Summarization: abstractive engine with an extractive fallback.
//!
//! The fallback is a pure function over the sentence delimiter — always
//! available, deterministic, and incapable of failing — so this stage's
//! cascade can never be exhausted on non-empty input.

use crate::config::PipelineConfig;
use crate::strategy::{Cascade, Outcome};
use std::sync::Arc;
use tracing::debug;

/// Sentence budget for summaries of the extracted source text.
///
/// The two call sites deliberately keep separate budgets (the source summary
/// runs a sentence longer than the target one); they are named constants
/// rather than one shared value so neither site silently changes the other.
pub const SOURCE_SUMMARY_SENTENCES: usize = 3;

/// Sentence budget for summaries of the translated text.
pub const TARGET_SUMMARY_SENTENCES: usize = 2;

const SENTENCE_DELIMITER: char = '.';
const ELLIPSIS: &str = "...";

/// Summarise `text`. Returns `""` only when the input is empty.
///
/// `sentence_budget` applies to the extractive fallback; the abstractive
/// engine is bounded by the word counts configured in [`PipelineConfig`].
pub async fn summarize(text: &str, sentence_budget: usize, config: &PipelineConfig) -> String {
    if text.trim().is_empty() {
        debug!("nothing to summarise, short-circuiting");
        return String::new();
    }

    let mut cascade = Cascade::new("summarization");

    if let Some(engine) = config.engines.abstractive.as_ref().map(Arc::clone) {
        let input = text.to_string();
        let (min_words, max_words) = (config.summary_min_words, config.summary_max_words);
        cascade = cascade.step("abstractive", move || async move {
            Outcome::from_result(engine.summarize(&input, min_words, max_words).await)
        });
    } else {
        debug!("abstractive engine not loaded for this process, using extractive fallback only");
    }

    let fallback_input = text.to_string();
    cascade = cascade.step("extractive", move || async move {
        Outcome::Produced(leading_sentences(&fallback_input, sentence_budget))
    });

    cascade.resolve().await
}

/// Extractive heuristic: the first `budget` sentences, or the text unchanged.
///
/// Sentences are whatever `'.'` delimits; a trailing empty segment from a
/// terminal delimiter does not count. When the text holds more sentences
/// than the budget, the leading ones are rejoined on the delimiter and
/// marked with an ellipsis; otherwise the text passes through unchanged.
pub fn leading_sentences(text: &str, budget: usize) -> String {
    let mut sentences: Vec<&str> = text.split(SENTENCE_DELIMITER).collect();
    if sentences.last() == Some(&"") {
        sentences.pop();
    }

    if sentences.len() > budget {
        let separator = SENTENCE_DELIMITER.to_string();
        let mut summary = sentences[..budget].join(separator.as_str());
        summary.push_str(ELLIPSIS);
        summary
    } else {
        text.to_string()
    }
}
