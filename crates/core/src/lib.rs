//! # Agendum Core
//!
//! Domain types, traits, and error definitions for agendum, the meeting
//! history prompt builder. This crate holds no algorithms; it defines the
//! records and capabilities that the other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every external collaborator is a trait here:
//! - [`TokenCounter`] / [`AsyncTokenCounter`] measure text
//! - [`Provider`] generates text from a prompt
//!
//! Meeting records ([`Participant`], [`ChatTurn`], [`AgendaMap`],
//! [`MeetingContext`]) replace loosely typed JSON payloads.

pub mod counter;
pub mod error;
pub mod meeting;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use counter::{AsyncTokenCounter, TokenCounter};
pub use error::{ChunkError, Error, ProviderError, Result};
pub use meeting::{AgendaMap, AgendaOrder, ChatTurn, MeetingContext, Participant};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
