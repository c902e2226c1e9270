//! Infrastructure layer for MindMeld.
//!
//! Contains implementations of the trait seams defined in `mindmeld-core`:
//! SQLite storage (sessions + key-value), the OpenRouter-compatible
//! completion client, the hosted remote session store, and the auth
//! provider client with its on-disk credential cache.

pub mod auth;
pub mod config;
pub mod llm;
pub mod remote;
pub mod sqlite;
