//! Completion service clients.
//!
//! Contains the OpenRouter-compatible provider implementing
//! `CompletionProvider` from `mindmeld-core`.

pub mod openrouter;

pub use openrouter::OpenRouterProvider;
