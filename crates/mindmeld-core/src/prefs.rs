//! Persisted preferences: the selected model.

use mindmeld_types::error::RepositoryError;
use mindmeld_types::model::{default_model, find_model};
use tracing::warn;

use crate::storage::keys;
use crate::storage::kv_store::KvStore;

/// Errors from preference updates.
#[derive(Debug, thiserror::Error)]
pub enum PrefsError {
    #[error("unknown model: '{0}'")]
    UnknownModel(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Reads and writes persisted preferences.
pub struct PrefsService<K: KvStore> {
    kv: K,
}

impl<K: KvStore> PrefsService<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// The selected model id, falling back to the catalog default when
    /// nothing is stored or the stored id is no longer in the catalog.
    pub async fn selected_model(&self) -> Result<String, RepositoryError> {
        match self.kv.get(keys::MODEL).await? {
            Some(serde_json::Value::String(id)) if find_model(&id).is_some() => Ok(id),
            Some(other) => {
                warn!(stored = %other, "stored model not in catalog, using default");
                Ok(default_model().to_string())
            }
            None => Ok(default_model().to_string()),
        }
    }

    /// Persist the selected model. Rejects ids not in the catalog.
    pub async fn set_model(&self, id: &str) -> Result<(), PrefsError> {
        if find_model(id).is_none() {
            return Err(PrefsError::UnknownModel(id.to_string()));
        }
        self.kv
            .set(keys::MODEL, &serde_json::Value::String(id.to_string()))
            .await?;
        Ok(())
    }
}
