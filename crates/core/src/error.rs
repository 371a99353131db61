//! Error types for the agendum domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all agendum operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Chunking errors ---
    #[error("Chunking error: {0}")]
    Chunk(#[from] ChunkError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Input errors ---
    #[error("Meeting record {path}: {reason}")]
    Input { path: String, reason: String },

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Failures raised while rendering or splitting meeting history.
#[derive(Debug, Clone, Error)]
pub enum ChunkError {
    /// A chat turn names a sender that is not among the participants.
    #[error("Unknown sender '{sender}': not present in the participant list")]
    UnknownSender { sender: String },

    /// A single agenda block (with the topic header) does not fit the budget.
    #[error("Agenda block needs {tokens} tokens but the budget is {budget}; it cannot be split further")]
    OverBudget { tokens: usize, budget: usize },

    /// The token counter itself failed. Surfaced as-is.
    #[error(transparent)]
    TokenCounter(#[from] ProviderError),
}

/// Failures reported by a provider or a token counter.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Token counting failed: {0}")]
    TokenCount(String),
}
