//! Hosted translation fallback — a LibreTranslate-compatible JSON API.
//!
//! This is the "always worth trying" leg of the translation cascade: a
//! general-purpose service that accepts an explicit target-language code per
//! request instead of being bound to one pair at startup. It is consulted
//! only after the preferred engine has failed (or never loaded).

use crate::engines::{EngineOptions, HostedTranslator};
use crate::error::EngineError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Client for the hosted translation service.
pub struct HostedTranslateClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    source_language: String,
}

impl HostedTranslateClient {
    /// Build the client. Fails only if the HTTP client itself cannot be
    /// constructed; reachability is checked per call, not at startup — a
    /// hosted service that is briefly down should not be written off for
    /// the process lifetime the way the eagerly-loaded engines are.
    pub fn new(options: &EngineOptions) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.http_timeout_secs))
            .build()
            .map_err(|e| EngineError::Unavailable(format!("http client: {e}")))?;

        Ok(Self {
            client,
            endpoint: options.hosted_endpoint.trim_end_matches('/').to_string(),
            api_key: options.hosted_api_key.clone(),
            source_language: options.source_language.clone(),
        })
    }
}

#[async_trait]
impl HostedTranslator for HostedTranslateClient {
    async fn translate(
        &self,
        text: &str,
        target_language: &str,
    ) -> Result<String, EngineError> {
        let request = TranslateRequest {
            q: text,
            source: &self.source_language,
            target: target_language,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Invocation(format!("translate call failed: {e}")))?
            .error_for_status()
            .map_err(|e| EngineError::Invocation(format!("translate call rejected: {e}")))?;

        let payload: TranslateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidOutput(format!("malformed translate response: {e}")))?;

        debug!(target = target_language, chars = payload.translated_text.len(), "hosted translation complete");
        Ok(payload.translated_text)
    }
}
