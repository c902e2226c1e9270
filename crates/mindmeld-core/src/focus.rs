//! Focus-mode service.
//!
//! Persists the countdown state so any command can tell whether a focus
//! interval is running. While active, suggestion fetches are refused by the
//! caller (see the CLI's suggest handler).

use chrono::Utc;
use mindmeld_types::error::RepositoryError;
use mindmeld_types::focus::{FOCUS_PRESETS_MIN, FocusState};
use tracing::info;

use crate::storage::keys;
use crate::storage::kv_store::{KvStore, set_json};

/// Errors from focus-mode operations.
#[derive(Debug, thiserror::Error)]
pub enum FocusError {
    #[error("focus duration must be one of {FOCUS_PRESETS_MIN:?} minutes")]
    InvalidDuration(u32),

    #[error("a focus countdown is already running")]
    AlreadyRunning,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Starts, inspects, and stops focus countdowns.
pub struct FocusService<K: KvStore> {
    kv: K,
}

impl<K: KvStore> FocusService<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// The stored countdown, running or elapsed.
    pub async fn current(&self) -> Result<Option<FocusState>, RepositoryError> {
        match self.kv.get(keys::FOCUS).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| RepositoryError::Query(format!("corrupt focus state: {e}"))),
            None => Ok(None),
        }
    }

    /// Whether a countdown is running right now.
    pub async fn is_active(&self) -> Result<bool, RepositoryError> {
        Ok(self
            .current()
            .await?
            .is_some_and(|f| f.is_active(Utc::now())))
    }

    /// Start a countdown for one of the preset durations.
    pub async fn start(&self, minutes: u32) -> Result<FocusState, FocusError> {
        if !FOCUS_PRESETS_MIN.contains(&minutes) {
            return Err(FocusError::InvalidDuration(minutes));
        }
        if self.is_active().await? {
            return Err(FocusError::AlreadyRunning);
        }
        let state = FocusState::start(minutes);
        set_json(&self.kv, keys::FOCUS, &state).await?;
        info!(minutes, "focus countdown started");
        Ok(state)
    }

    /// Stop the countdown and return its final state, if one was stored.
    pub async fn stop(&self) -> Result<Option<FocusState>, RepositoryError> {
        let state = self.current().await?;
        if state.is_some() {
            self.kv.delete(keys::FOCUS).await?;
            info!("focus countdown stopped");
        }
        Ok(state)
    }
}
