//! Agenda-by-agenda meeting summaries.
//!
//! Chunks a meeting history against the model's input limit, sends one
//! prompt per chunk through a [`Provider`](agendum_core::Provider) and
//! parses the JSON answers back into [`AgendaSummary`] records.

pub mod format;
pub mod summarizer;
pub mod template;

pub use format::{AgendaSummary, SummaryEntry, format_summaries, parse_summaries, response_schema};
pub use summarizer::MeetingSummarizer;
pub use template::{DEFAULT_SUMMARY_TEMPLATE, HISTORY_PLACEHOLDER, PromptTemplate};

use agendum_core::{ChunkError, ProviderError};

/// Summary pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum SummaryError {
    #[error("Chunking failed: {0}")]
    Chunk(#[from] ChunkError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Invalid prompt template: {0}")]
    InvalidTemplate(String),

    #[error("Prompt template uses {template_tokens} tokens, input limit is {limit}")]
    TemplateTooLarge { template_tokens: usize, limit: usize },
}

impl From<SummaryError> for agendum_core::Error {
    fn from(err: SummaryError) -> Self {
        match err {
            SummaryError::Chunk(e) => Self::Chunk(e),
            SummaryError::Provider(e) => Self::Provider(e),
            other => Self::Internal(other.to_string()),
        }
    }
}
