//! The idea board.
//!
//! The board is the active list of ideas, persisted under a single storage
//! key so every command sees the same state. Adding an idea while a focus
//! countdown is running also bumps the countdown's idea counter.

use mindmeld_types::error::RepositoryError;
use mindmeld_types::focus::FocusState;
use mindmeld_types::idea::Idea;
use tracing::debug;

use crate::storage::keys;
use crate::storage::kv_store::{KvStore, get_or_default, set_json};

/// Maintains the active idea list.
pub struct BoardService<K: KvStore> {
    kv: K,
}

impl<K: KvStore> BoardService<K> {
    pub fn new(kv: K) -> Self {
        Self { kv }
    }

    /// Current board contents, in insertion order.
    pub async fn list(&self) -> Result<Vec<Idea>, RepositoryError> {
        get_or_default(&self.kv, keys::BOARD).await
    }

    /// Add one idea. Blank input is ignored and returns None.
    pub async fn add(&self, text: &str) -> Result<Option<Idea>, RepositoryError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let mut ideas: Vec<Idea> = self.list().await?;
        let idea = Idea::new(text);
        ideas.push(idea.clone());
        set_json(&self.kv, keys::BOARD, &ideas).await?;
        self.bump_focus_counter(1).await?;
        debug!(id = idea.id, "idea added");
        Ok(Some(idea))
    }

    /// Append a batch of already-created ideas (AI suggestions).
    pub async fn append(&self, new_ideas: &[Idea]) -> Result<(), RepositoryError> {
        if new_ideas.is_empty() {
            return Ok(());
        }
        let mut ideas: Vec<Idea> = self.list().await?;
        ideas.extend_from_slice(new_ideas);
        set_json(&self.kv, keys::BOARD, &ideas).await?;
        self.bump_focus_counter(new_ideas.len() as u32).await?;
        Ok(())
    }

    /// Replace the whole board (session load).
    pub async fn replace(&self, ideas: &[Idea]) -> Result<(), RepositoryError> {
        set_json(&self.kv, keys::BOARD, &ideas).await
    }

    /// Clear the board.
    pub async fn clear(&self) -> Result<(), RepositoryError> {
        self.kv.delete(keys::BOARD).await
    }

    /// Count ideas added while a focus countdown is running.
    async fn bump_focus_counter(&self, added: u32) -> Result<(), RepositoryError> {
        let Some(value) = self.kv.get(keys::FOCUS).await? else {
            return Ok(());
        };
        let Ok(mut focus) = serde_json::from_value::<FocusState>(value) else {
            // Corrupt focus state never blocks adding ideas.
            return Ok(());
        };
        if focus.is_active(chrono::Utc::now()) {
            focus.ideas_added += added;
            set_json(&self.kv, keys::FOCUS, &focus).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryKvStore;

    #[tokio::test]
    async fn test_add_trims_and_appends() {
        let board = BoardService::new(MemoryKvStore::new());
        board.add("  first idea  ").await.unwrap();
        board.add("second").await.unwrap();

        let ideas = board.list().await.unwrap();
        assert_eq!(ideas.len(), 2);
        assert_eq!(ideas[0].text, "first idea");
        assert_eq!(ideas[1].text, "second");
    }

    #[tokio::test]
    async fn test_add_blank_is_ignored() {
        let board = BoardService::new(MemoryKvStore::new());
        assert!(board.add("   ").await.unwrap().is_none());
        assert!(board.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_replace_and_clear() {
        let board = BoardService::new(MemoryKvStore::new());
        board.add("old").await.unwrap();

        let loaded = vec![Idea::new("from session")];
        board.replace(&loaded).await.unwrap();
        assert_eq!(board.list().await.unwrap(), loaded);

        board.clear().await.unwrap();
        assert!(board.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_during_focus_bumps_counter() {
        let kv = MemoryKvStore::new();
        let focus = FocusState::start(15);
        set_json(&kv, keys::FOCUS, &focus).await.unwrap();

        let board = BoardService::new(kv);
        board.add("one").await.unwrap();
        board.append(&[Idea::new("two"), Idea::new("three")]).await.unwrap();

        let stored = stored_focus(&board).await;
        assert_eq!(stored.ideas_added, 3);
    }

    #[tokio::test]
    async fn test_add_outside_focus_leaves_counter() {
        let kv = MemoryKvStore::new();
        let focus = FocusState::start(0); // zero-length countdown, already elapsed
        set_json(&kv, keys::FOCUS, &focus).await.unwrap();

        let board = BoardService::new(kv);
        board.add("one").await.unwrap();

        let stored = stored_focus(&board).await;
        assert_eq!(stored.ideas_added, 0);
    }

    async fn stored_focus<K: KvStore>(board: &BoardService<K>) -> FocusState {
        let value = board.kv.get(keys::FOCUS).await.unwrap().unwrap();
        serde_json::from_value(value).unwrap()
    }
}
