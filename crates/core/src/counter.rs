//! Token-counting capabilities.
//!
//! The history builder never measures text itself; it asks a counter.
//! Counters may be local heuristics, exact tokenizers or remote calls, so
//! counting is fallible. Any plain `Fn(&str) -> usize` closure is a counter.

use crate::error::ProviderError;
use async_trait::async_trait;

/// Synchronous token counter.
///
/// Must be deterministic within one chunking run: the same text yields the
/// same count.
pub trait TokenCounter {
    fn count_tokens(&self, text: &str) -> Result<usize, ProviderError>;
}

impl<F> TokenCounter for F
where
    F: Fn(&str) -> usize,
{
    fn count_tokens(&self, text: &str) -> Result<usize, ProviderError> {
        Ok(self(text))
    }
}

/// Asynchronous token counter, for counters backed by a network call.
///
/// `Sync` is required because both halves of a split are counted
/// concurrently against the same counter.
#[async_trait]
pub trait AsyncTokenCounter: Send + Sync {
    async fn count_tokens(&self, text: &str) -> Result<usize, ProviderError>;
}
