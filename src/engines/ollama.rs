//! Preferred inference engines served by a local inference server
//! (Ollama-compatible `/api/generate` endpoint).
//!
//! ## Load once, degrade permanently
//!
//! Both engines probe the server's `/api/tags` endpoint in `connect()`. The
//! probe runs exactly once, from [`crate::engines::EngineSet::initialize`] at
//! process start: a server that is down at startup means the engine handle is
//! never constructed and the stage runs on its fallback for the process
//! lifetime. There is no per-request reconnect.
//!
//! ## Bounded input, no chunking
//!
//! The translator truncates its input to a fixed character budget before
//! inference. Texts longer than the budget are passed through bounded —
//! deliberately, as documented behaviour: the fallback cascade needs a
//! predictable single call per stage, and partial translation of a very long
//! document degrades the same way as any other partial result (callers see
//! what the engine produced, or the fallback's output).

use crate::engines::{AbstractiveSummarizer, EngineOptions, NeuralTranslator};
use crate::error::EngineError;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Timeout for the one-shot availability probe at startup.
const PROBE_TIMEOUT_SECS: u64 = 3;

/// Sampling temperature for both engines. Translation and summarization are
/// transcription-like tasks; creativity only hurts fidelity.
const TEMPERATURE: f32 = 0.1;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Shared plumbing for the two inference-server engines.
#[derive(Debug, Clone)]
struct ServerClient {
    client: reqwest::Client,
    host: String,
    model: String,
}

impl ServerClient {
    async fn connect(
        host: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, EngineError> {
        let probe = reqwest::Client::builder()
            .timeout(Duration::from_secs(PROBE_TIMEOUT_SECS))
            .build()
            .map_err(|e| EngineError::Unavailable(format!("http client: {e}")))?;

        probe
            .get(format!("{host}/api/tags"))
            .send()
            .await
            .map_err(|e| EngineError::Unavailable(format!("inference server not reachable at {host}: {e}")))?
            .error_for_status()
            .map_err(|e| EngineError::Unavailable(format!("inference server at {host} unhealthy: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| EngineError::Unavailable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            host: host.to_string(),
            model: model.to_string(),
        })
    }

    async fn generate(&self, prompt: String, max_tokens: usize) -> Result<String, EngineError> {
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
            "options": { "temperature": TEMPERATURE, "num_predict": max_tokens },
        });

        let response = self
            .client
            .post(format!("{}/api/generate", self.host))
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Invocation(format!("generate call failed: {e}")))?
            .error_for_status()
            .map_err(|e| EngineError::Invocation(format!("generate call rejected: {e}")))?;

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidOutput(format!("malformed generate response: {e}")))?;

        debug!(model = %self.model, chars = payload.response.len(), "inference complete");
        Ok(payload.response.trim().to_string())
    }
}

// ── Translation ──────────────────────────────────────────────────────────

/// Neural translation bound to one source→target pair at construction.
pub struct InferenceTranslator {
    server: ServerClient,
    source_language: String,
    target_language: String,
    input_budget: usize,
}

impl InferenceTranslator {
    /// Probe the server and bind the engine to the configured language pair.
    pub async fn connect(options: &EngineOptions) -> Result<Self, EngineError> {
        let server = ServerClient::connect(
            &options.inference_host,
            &options.translation_model,
            options.http_timeout_secs,
        )
        .await?;
        Ok(Self {
            server,
            source_language: options.source_language.clone(),
            target_language: options.target_language.clone(),
            input_budget: options.translation_input_budget.max(1),
        })
    }
}

#[async_trait]
impl NeuralTranslator for InferenceTranslator {
    async fn translate(&self, text: &str) -> Result<String, EngineError> {
        let bounded = truncate_to_budget(text, self.input_budget);
        if bounded.len() < text.len() {
            debug!(
                budget = self.input_budget,
                dropped = text.len() - bounded.len(),
                "translation input truncated to engine budget"
            );
        }

        let prompt = format!(
            "Translate the following text from '{}' to '{}'. \
             Reply with the translation only, no commentary.\n\n{}",
            self.source_language, self.target_language, bounded
        );

        // Allow roughly one output token per input character; generous for
        // any realistic language pair while still bounding the call.
        self.server.generate(prompt, self.input_budget.min(4096)).await
    }
}

// ── Summarization ────────────────────────────────────────────────────────

/// Abstractive summarization with caller-supplied output-length bounds.
pub struct InferenceSummarizer {
    server: ServerClient,
}

impl InferenceSummarizer {
    pub async fn connect(options: &EngineOptions) -> Result<Self, EngineError> {
        let server = ServerClient::connect(
            &options.inference_host,
            &options.summary_model,
            options.http_timeout_secs,
        )
        .await?;
        Ok(Self { server })
    }
}

#[async_trait]
impl AbstractiveSummarizer for InferenceSummarizer {
    async fn summarize(
        &self,
        text: &str,
        min_words: usize,
        max_words: usize,
    ) -> Result<String, EngineError> {
        let prompt = format!(
            "Summarise the following text in between {min_words} and {max_words} words, \
             in the same language as the text. Reply with the summary only.\n\n{text}"
        );

        // ~2 tokens per word of headroom over the upper bound.
        self.server.generate(prompt, max_words.saturating_mul(2).max(32)).await
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────

/// Truncate to at most `budget` bytes, backing off to a char boundary.
fn truncate_to_budget(text: &str, budget: usize) -> &str {
    if text.len() <= budget {
        return text;
    }
    let mut end = budget;
    while end > 0 && !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
