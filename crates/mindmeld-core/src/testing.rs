//! In-memory trait implementations shared by unit tests in this crate.

use std::collections::HashMap;
use std::sync::Mutex;

use mindmeld_types::error::RepositoryError;
use mindmeld_types::idea::Idea;
use mindmeld_types::session::Session;
use uuid::Uuid;

use crate::session::repository::SessionRepository;
use crate::storage::kv_store::KvStore;

/// HashMap-backed [`KvStore`].
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.clone());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Vec-backed [`SessionRepository`] preserving insertion order for
/// deterministic recency sorting.
pub struct MemorySessionRepository {
    rows: Mutex<Vec<Session>>,
}

impl MemorySessionRepository {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl SessionRepository for MemorySessionRepository {
    async fn list(&self, owner: &Uuid) -> Result<Vec<Session>, RepositoryError> {
        let mut sessions: Vec<Session> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.owner == *owner)
            .cloned()
            .collect();
        // Most recent first; ids are strictly increasing so they break
        // created_at ties.
        sessions.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(sessions)
    }

    async fn find_by_name(
        &self,
        owner: &Uuid,
        name: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.owner == *owner && s.name == name)
            .cloned())
    }

    async fn insert(&self, session: &Session) -> Result<(), RepositoryError> {
        self.rows.lock().unwrap().push(session.clone());
        Ok(())
    }

    async fn replace_ideas(
        &self,
        owner: &Uuid,
        id: i64,
        ideas: &[Idea],
    ) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        match rows.iter_mut().find(|s| s.owner == *owner && s.id == id) {
            Some(session) => {
                session.ideas = ideas.to_vec();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    async fn rename(
        &self,
        owner: &Uuid,
        old_name: &str,
        new_name: &str,
    ) -> Result<u64, RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let mut renamed = 0;
        for session in rows.iter_mut() {
            if session.owner == *owner && session.name == old_name {
                session.name = new_name.to_string();
                renamed += 1;
            }
        }
        Ok(renamed)
    }

    async fn delete(&self, owner: &Uuid, id: i64) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|s| !(s.owner == *owner && s.id == id));
        if rows.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
