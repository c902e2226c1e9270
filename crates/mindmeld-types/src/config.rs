//! Application configuration types for MindMeld.
//!
//! Deserialized from `config.toml` in the data directory. Every field has a
//! default so a missing or partial file still yields a working local-only
//! configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which session persistence backend to use.
///
/// Exactly one backend is active at a time; there is no dual-write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Local SQLite table (offline-first default).
    #[default]
    Local,
    /// Hosted session store; requires `[remote]` and a signed-in user.
    Remote,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Remote => write!(f, "remote"),
        }
    }
}

/// Completion-service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenRouter-compatible aggregator.
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://openrouter.ai/api/v1".to_string(),
        }
    }
}

/// Hosted backend settings (remote session store + auth provider).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the hosted backend (serves both `/auth/v1` and `/rest/v1`).
    pub base_url: String,
    /// Public (anon) API key sent with every request.
    pub anon_key: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageBackend,
    pub llm: LlmConfig,
    pub remote: Option<RemoteConfig>,
}
