//! Exact token counts from a Hugging Face `tokenizer.json`.
//!
//! Enabled with the `hf-tokenizer` feature.

use agendum_core::{AsyncTokenCounter, ProviderError, TokenCounter};
use async_trait::async_trait;
use std::path::Path;
use tokenizers::Tokenizer;

pub struct HfTokenCounter {
    tokenizer: Tokenizer,
}

impl HfTokenCounter {
    /// Load a tokenizer from a `tokenizer.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ProviderError> {
        let path = path.as_ref();
        let tokenizer = Tokenizer::from_file(path).map_err(|e| {
            ProviderError::NotConfigured(format!(
                "Failed to load tokenizer from {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(Self { tokenizer })
    }

    pub fn new(tokenizer: Tokenizer) -> Self {
        Self { tokenizer }
    }

    fn count(&self, text: &str) -> Result<usize, ProviderError> {
        self.tokenizer
            .encode(text, false)
            .map(|encoding| encoding.len())
            .map_err(|e| ProviderError::TokenCount(e.to_string()))
    }
}

impl TokenCounter for HfTokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, ProviderError> {
        self.count(text)
    }
}

#[async_trait]
impl AsyncTokenCounter for HfTokenCounter {
    async fn count_tokens(&self, text: &str) -> Result<usize, ProviderError> {
        self.count(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tokenizer_file_is_not_configured() {
        let err = HfTokenCounter::from_file("/nonexistent/tokenizer.json")
            .err()
            .unwrap();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
        assert!(err.to_string().contains("/nonexistent/tokenizer.json"));
    }
}
