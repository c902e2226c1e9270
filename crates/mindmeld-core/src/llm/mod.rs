//! Completion-service trait seam.

pub mod provider;

pub use provider::CompletionProvider;
