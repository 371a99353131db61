//! Meeting history → prompt context.
//!
//! The pipeline, per request:
//!
//! 1. **Resolve speaker labels** once from the participant list
//!    (homonyms get letter suffixes)
//! 2. **Render agenda blocks**: one block per agenda item, a header line plus
//!    one `label(role): message` line per chat turn
//! 3. **Chunk** the blocks under a topic header so each chunk fits a token
//!    budget, asking an external counter for sizes
//!
//! Nothing is cached between requests; a builder is built from one
//! [`MeetingContext`](agendum_core::MeetingContext) and dropped afterwards.

#[cfg(feature = "hf-tokenizer")]
pub mod hf;
pub mod history;
pub mod names;
pub mod split;
pub mod token;

#[cfg(feature = "hf-tokenizer")]
pub use hf::HfTokenCounter;
pub use history::{AgendaBlock, HistoryOptions, MeetingHistoryBuilder};
pub use names::{SpeakerLabels, resolve};
pub use split::{split_within_budget, split_within_budget_async};
pub use token::{CharEstimator, estimate_tokens};
