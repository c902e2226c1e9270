//! Shared domain types for MindMeld.
//!
//! This crate contains the core domain types used across the MindMeld
//! workspace: ideas, sessions, assistant messages, model catalog, focus
//! state, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod config;
pub mod error;
pub mod focus;
pub mod id;
pub mod idea;
pub mod identity;
pub mod llm;
pub mod model;
pub mod session;
