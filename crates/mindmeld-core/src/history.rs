//! Suggestion history.
//!
//! Accepted AI suggestions are recorded most-recent-first, capped at
//! [`HISTORY_CAP`] entries, so they can be reused on a later board.

use mindmeld_types::error::RepositoryError;
use mindmeld_types::idea::{HISTORY_CAP, HistoryEntry};

use crate::storage::keys;
use crate::storage::kv_store::{KvStore, get_or_default, set_json};

/// Maintains the capped suggestion history.
pub struct HistoryService<K: KvStore> {
    kv: K,
}

impl<K: KvStore> HistoryService<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Stored entries, most recent first.
    pub async fn list(&self) -> Result<Vec<HistoryEntry>, RepositoryError> {
        get_or_default(&self.kv, keys::HISTORY).await
    }

    /// Prepend a batch of suggestion texts, truncating to the cap.
    pub async fn record(&self, texts: &[String]) -> Result<(), RepositoryError> {
        if texts.is_empty() {
            return Ok(());
        }
        let existing = self.list().await?;
        let mut entries: Vec<HistoryEntry> =
            texts.iter().map(|t| HistoryEntry::new(t.clone())).collect();
        entries.extend(existing);
        entries.truncate(HISTORY_CAP);
        set_json(&self.kv, keys::HISTORY, &entries).await
    }

    /// Look up an entry by id (for reuse on the board).
    pub async fn find(&self, id: i64) -> Result<Option<HistoryEntry>, RepositoryError> {
        Ok(self.list().await?.into_iter().find(|e| e.id == id))
    }

    /// Wipe the history.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.kv.delete(keys::HISTORY).await
    }
}
