//! Business logic and trait seams for MindMeld.
//!
//! This crate defines the repository and provider traits (implemented in
//! mindmeld-infra) and the services orchestrating board, session, suggestion,
//! assistant, history, and focus-mode behavior. It never depends on
//! mindmeld-infra.

pub mod assistant;
pub mod board;
pub mod export;
pub mod focus;
pub mod history;
pub mod llm;
pub mod prefs;
pub mod session;
pub mod storage;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;
