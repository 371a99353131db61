//! Token estimation utilities.
//!
//! Uses a byte-based heuristic: ~4 bytes per token, rounded up.
//! Good enough for sizing chunks offline; use an exact tokenizer or the
//! provider's own counter when the budget is tight.

use agendum_core::{AsyncTokenCounter, ProviderError, TokenCounter};
use async_trait::async_trait;

/// Estimate the token count for a string.
///
/// Heuristic: 1 token ≈ 4 bytes. Rounds up.
pub fn estimate_tokens(text: &str) -> usize {
    text.len().div_ceil(4)
}

/// Infallible counter backed by [`estimate_tokens`].
#[derive(Debug, Clone, Copy, Default)]
pub struct CharEstimator;

impl TokenCounter for CharEstimator {
    fn count_tokens(&self, text: &str) -> Result<usize, ProviderError> {
        Ok(estimate_tokens(text))
    }
}

#[async_trait]
impl AsyncTokenCounter for CharEstimator {
    async fn count_tokens(&self, text: &str) -> Result<usize, ProviderError> {
        Ok(estimate_tokens(text))
    }
}
