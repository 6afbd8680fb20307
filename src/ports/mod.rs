//! Port traits defining external boundaries.
//!
//! The narration service is the only system this crate talks to over the
//! network, so it is the only boundary abstracted behind a trait.
//! Implementations live in `src/adapters/`.

pub mod llm;

pub use llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};
