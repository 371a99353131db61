//! Token-budget splitting of agenda blocks.
//!
//! The block list is bisected recursively: if the header plus every block
//! fits the budget it becomes one chunk, otherwise each half is tried on its
//! own. Splits happen only between blocks, never inside one, and the split
//! point is always the midpoint. This is not an optimal bin-packing; a tree
//! ending in `k` chunks costs `2k − 1` counter calls.
//!
//! Every chunk is `header + blocks.join("\n")`, so stripping the header from
//! each chunk and concatenating the rest reproduces the input in order.

use agendum_core::{AsyncTokenCounter, ChunkError, TokenCounter};
use futures::future::BoxFuture;
use tracing::trace;

/// Render one chunk: the header followed by the newline-joined blocks.
pub fn compose(header: &str, blocks: &[String]) -> String {
    format!("{}{}", header, blocks.join("\n"))
}

/// Split `blocks` into chunks that each count at most `budget` tokens.
///
/// Fails with [`ChunkError::OverBudget`] when a single block (with the
/// header) does not fit, and with [`ChunkError::TokenCounter`] when the
/// counter fails.
pub fn split_within_budget(
    header: &str,
    blocks: &[String],
    counter: &dyn TokenCounter,
    budget: usize,
) -> Result<Vec<String>, ChunkError> {
    let candidate = compose(header, blocks);
    let tokens = counter.count_tokens(&candidate)?;
    trace!(blocks = blocks.len(), tokens, budget, "Measured chunk candidate");

    if tokens <= budget {
        return Ok(vec![candidate]);
    }
    if blocks.len() <= 1 {
        return Err(ChunkError::OverBudget { tokens, budget });
    }

    let mid = blocks.len() / 2;
    let mut chunks = split_within_budget(header, &blocks[..mid], counter, budget)?;
    chunks.extend(split_within_budget(header, &blocks[mid..], counter, budget)?);
    Ok(chunks)
}

/// Async variant of [`split_within_budget`].
///
/// Both halves of a split are measured concurrently; the result keeps the
/// original block order regardless of which half finishes first.
pub fn split_within_budget_async<'a>(
    header: &'a str,
    blocks: &'a [String],
    counter: &'a dyn AsyncTokenCounter,
    budget: usize,
) -> BoxFuture<'a, Result<Vec<String>, ChunkError>> {
    Box::pin(async move {
        let candidate = compose(header, blocks);
        let tokens = counter.count_tokens(&candidate).await?;
        trace!(blocks = blocks.len(), tokens, budget, "Measured chunk candidate");

        if tokens <= budget {
            return Ok(vec![candidate]);
        }
        if blocks.len() <= 1 {
            return Err(ChunkError::OverBudget { tokens, budget });
        }

        let mid = blocks.len() / 2;
        let (mut left, right) = futures::future::try_join(
            split_within_budget_async(header, &blocks[..mid], counter, budget),
            split_within_budget_async(header, &blocks[mid..], counter, budget),
        )
        .await?;
        left.extend(right);
        Ok(left)
    })
}
