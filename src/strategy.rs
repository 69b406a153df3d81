//! Ranked cascading-strategy executor.
//!
//! Translation and summarization share one fallback shape: an ordered list of
//! capability providers tried in sequence, where a provider "wins" only if it
//! returns a tagged success with non-blank text. Encoding that shape once here
//! replaces per-stage conditional logic and keeps the "never raises past the
//! component boundary" contract structural: providers hand back an [`Outcome`]
//! tag, the executor inspects it, and exhaustion yields an empty string.
//!
//! Steps are supplied as closures and only invoked when every earlier step
//! has failed, so a healthy preferred engine never pays for its fallback.

use crate::error::EngineError;
use futures::future::BoxFuture;
use futures::FutureExt;
use std::future::Future;
use tracing::{debug, warn};

/// Tagged result of a single capability attempt.
///
/// Providers convert their own errors into `Failed` at the call site; the
/// executor never sees a raised error.
#[derive(Debug)]
pub enum Outcome {
    /// The provider answered. Blank text still counts as a failed attempt.
    Produced(String),
    /// The provider was unavailable or its call failed.
    Failed(EngineError),
}

impl Outcome {
    /// Build an outcome from a capability-call result.
    pub fn from_result(result: Result<String, EngineError>) -> Self {
        match result {
            Ok(text) => Outcome::Produced(text),
            Err(err) => Outcome::Failed(err),
        }
    }
}

type StepFn<'a> = Box<dyn FnOnce() -> BoxFuture<'a, Outcome> + Send + 'a>;

/// An ordered list of named capability attempts for one stage.
pub struct Cascade<'a> {
    stage: &'static str,
    steps: Vec<(&'static str, StepFn<'a>)>,
}

impl<'a> Cascade<'a> {
    /// Start an empty cascade for the named stage (used in log lines only).
    pub fn new(stage: &'static str) -> Self {
        Self {
            stage,
            steps: Vec::new(),
        }
    }

    /// Append a ranked step. Earlier steps are preferred.
    pub fn step<F, Fut>(mut self, name: &'static str, attempt: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Outcome> + Send + 'a,
    {
        self.steps.push((name, Box::new(move || attempt().boxed())));
        self
    }

    /// Run steps in order until one produces non-blank text.
    ///
    /// Returns the winning text, or an empty string when every step failed
    /// or produced only whitespace. Failures are logged, never propagated.
    pub async fn resolve(self) -> String {
        for (name, attempt) in self.steps {
            match attempt().await {
                Outcome::Produced(text) if !text.trim().is_empty() => {
                    debug!(stage = self.stage, provider = name, chars = text.len(), "provider succeeded");
                    return text;
                }
                Outcome::Produced(_) => {
                    warn!(stage = self.stage, provider = name, "provider produced blank output, trying next");
                }
                Outcome::Failed(err) => {
                    warn!(stage = self.stage, provider = name, error = %err, "provider failed, trying next");
                }
            }
        }
        debug!(stage = self.stage, "all providers exhausted, degrading to empty result");
        String::new()
    }
}
