//! AI suggestion fetch: prompt building, response parsing, orchestration.

pub mod parse;
pub mod prompt;
pub mod service;

pub use service::{SuggestError, SuggestService, SuggestionBatch};
