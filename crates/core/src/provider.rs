//! Provider trait — the abstraction over LLM backends.
//!
//! A Provider takes a rendered prompt and returns generated text. It can
//! also report how many tokens a text costs under its model, which the
//! summarizer uses as the budget oracle for history chunking.
//!
//! Concrete HTTP bindings live outside this workspace.

use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Configuration for a provider request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderRequest {
    /// The model to use (e.g., "gemini-2.0-flash")
    pub model: String,

    /// The fully rendered prompt
    pub prompt: String,

    /// Temperature (0.0 = deterministic, 2.0 = most random)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Nucleus sampling cutoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Top-k sampling cutoff
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// JSON Schema the response must follow, if structured output is wanted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<serde_json::Value>,
}

fn default_temperature() -> f32 {
    1.0
}

impl ProviderRequest {
    /// A plain text request with default sampling.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            temperature: default_temperature(),
            top_p: None,
            top_k: None,
            max_tokens: None,
            response_schema: None,
        }
    }
}

/// A complete response from a provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResponse {
    /// The generated text
    pub content: String,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// The core Provider trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this provider (e.g., "gemini").
    fn name(&self) -> &str;

    /// Send a request and get a complete response.
    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError>;

    /// Count tokens for `text` under `model`.
    ///
    /// Default implementation returns an error indicating counting isn't supported.
    async fn count_tokens(&self, model: &str, _text: &str) -> Result<usize, ProviderError> {
        Err(ProviderError::NotConfigured(format!(
            "Provider '{}' cannot count tokens for {}",
            self.name(),
            model
        )))
    }
}
