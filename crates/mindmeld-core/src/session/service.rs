//! Session service: save, load, delete, rename, import.
//!
//! Orchestrates the session repository (the single write path for session
//! rows) and the key-value store (which holds only the active-session
//! marker). Enforces the per-owner retention cap and owner scoping.

use mindmeld_types::error::{ImportError, RepositoryError};
use mindmeld_types::idea::Idea;
use mindmeld_types::session::{ActiveSession, MAX_SESSIONS, Session};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::session::import::parse_import;
use crate::session::repository::SessionRepository;
use crate::storage::kv_store::{KvStore, set_json};
use crate::storage::keys;

/// Result of a save request.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// A new session was created.
    Created(Session),
    /// An existing `(name, owner)` session had its ideas replaced in place.
    Replaced(Session),
    /// A session with this name exists and overwrite was not allowed;
    /// nothing was written. Carries the existing session for the prompt.
    Conflict(Session),
}

/// Result of a rename request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// No session is active; renaming is a no-op.
    NoActiveSession,
    /// The active session (and any same-named siblings) were renamed.
    Renamed { from: String, to: String },
}

/// Errors from session import: shape validation or persistence.
#[derive(Debug, thiserror::Error)]
pub enum ImportFailure {
    #[error(transparent)]
    Invalid(#[from] ImportError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Orchestrates session persistence and the active-session marker.
///
/// Generic over [`SessionRepository`] and [`KvStore`] so the same service
/// drives the local and remote backends (mindmeld-core never depends on
/// mindmeld-infra).
pub struct SessionService<R: SessionRepository, K: KvStore> {
    repo: R,
    kv: K,
}

impl<R: SessionRepository, K: KvStore> SessionService<R, K> {
    pub fn new(repo: R, kv: K) -> Self {
        Self { repo, kv }
    }

    /// List the owner's sessions, most recent first.
    pub async fn list(&self, owner: &Uuid) -> Result<Vec<Session>, RepositoryError> {
        self.repo.list(owner).await
    }

    /// The session currently loaded on the board, if any.
    pub async fn active(&self) -> Result<Option<ActiveSession>, RepositoryError> {
        match self.kv.get(keys::ACTIVE_SESSION).await? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|e| RepositoryError::Query(format!("corrupt active marker: {e}"))),
            None => Ok(None),
        }
    }

    /// Save the given ideas under `name`.
    ///
    /// If a session with the same `(name, owner)` already exists, its ideas
    /// are replaced in place -- but only when `overwrite` is set; otherwise
    /// the existing session is returned as a [`SaveOutcome::Conflict`] so
    /// the caller can ask for confirmation. New sessions are prepended and
    /// the list is truncated to the [`MAX_SESSIONS`] most recent.
    pub async fn save(
        &self,
        owner: &Uuid,
        name: &str,
        ideas: &[Idea],
        overwrite: bool,
    ) -> Result<SaveOutcome, RepositoryError> {
        if let Some(existing) = self.repo.find_by_name(owner, name).await? {
            if !overwrite {
                return Ok(SaveOutcome::Conflict(existing));
            }
            self.repo.replace_ideas(owner, existing.id, ideas).await?;
            info!(name, "session overwritten");
            let mut updated = existing;
            updated.ideas = ideas.to_vec();
            return Ok(SaveOutcome::Replaced(updated));
        }

        let session = Session::new(*owner, name, ideas.to_vec());
        self.repo.insert(&session).await?;
        self.evict_overflow(owner).await?;
        info!(name, ideas = ideas.len(), "session saved");
        Ok(SaveOutcome::Created(session))
    }

    /// Load a session by name and mark it active.
    ///
    /// The caller replaces the board with the returned ideas; this service
    /// only records the marker.
    pub async fn load(
        &self,
        owner: &Uuid,
        name: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        let Some(session) = self.repo.find_by_name(owner, name).await? else {
            return Ok(None);
        };
        let marker = ActiveSession {
            id: session.id,
            name: session.name.clone(),
        };
        set_json(&self.kv, keys::ACTIVE_SESSION, &marker).await?;
        info!(name, ideas = session.ideas.len(), "session loaded");
        Ok(Some(session))
    }

    /// Delete a session by id.
    ///
    /// Clears the active-session marker iff the deleted session was the
    /// active one; deleting any other session leaves the marker untouched.
    pub async fn delete(&self, owner: &Uuid, id: i64) -> Result<(), RepositoryError> {
        self.repo.delete(owner, id).await?;
        if let Some(active) = self.active().await? {
            if active.id == id {
                self.kv.delete(keys::ACTIVE_SESSION).await?;
                debug!(id, "active session deleted, marker cleared");
            }
        }
        info!(id, "session deleted");
        Ok(())
    }

    /// Rename the active session.
    ///
    /// Renames every entry matching `(old name, owner)` and updates the
    /// marker. A no-op when no session is active.
    pub async fn rename(
        &self,
        owner: &Uuid,
        new_name: &str,
    ) -> Result<RenameOutcome, RepositoryError> {
        let Some(active) = self.active().await? else {
            warn!("rename requested with no active session");
            return Ok(RenameOutcome::NoActiveSession);
        };

        let renamed = self.repo.rename(owner, &active.name, new_name).await?;
        let marker = ActiveSession {
            id: active.id,
            name: new_name.to_string(),
        };
        set_json(&self.kv, keys::ACTIVE_SESSION, &marker).await?;
        info!(from = %active.name, to = new_name, renamed, "session renamed");
        Ok(RenameOutcome::Renamed {
            from: active.name,
            to: new_name.to_string(),
        })
    }

    /// Import a raw session file for the current owner.
    ///
    /// Validates the `{id, name, ideas}` shape, re-tags the session with
    /// `owner` and a freshly minted id (the file's id is validated but not
    /// kept, so re-importing an export of a still-existing session cannot
    /// collide), prepends it, and truncates as in [`Self::save`]. Any
    /// validation failure aborts with no state change.
    pub async fn import(&self, owner: &Uuid, raw: &str) -> Result<Session, ImportFailure> {
        let imported = parse_import(raw)?;
        let session = Session::new(*owner, imported.name, imported.ideas);
        self.repo.insert(&session).await?;
        self.evict_overflow(owner).await?;
        info!(name = %session.name, "session imported");
        Ok(session)
    }

    /// Delete the oldest sessions beyond the retention cap.
    async fn evict_overflow(&self, owner: &Uuid) -> Result<(), RepositoryError> {
        let sessions = self.repo.list(owner).await?;
        for evicted in sessions.iter().skip(MAX_SESSIONS) {
            self.repo.delete(owner, evicted.id).await?;
            debug!(id = evicted.id, name = %evicted.name, "evicted oldest session");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryKvStore, MemorySessionRepository};

    fn service() -> SessionService<MemorySessionRepository, MemoryKvStore> {
        SessionService::new(MemorySessionRepository::new(), MemoryKvStore::new())
    }

    fn ideas(texts: &[&str]) -> Vec<Idea> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Idea {
                id: i as i64,
                text: (*t).to_string(),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_save_new_name_creates_one_entry() {
        let svc = service();
        let owner = Uuid::new_v4();

        let outcome = svc.save(&owner, "sprint", &ideas(&["a"]), false).await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Created(_)));
        assert_eq!(svc.list(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_save_existing_name_without_overwrite_is_conflict() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "sprint", &ideas(&["a"]), false).await.unwrap();

        let outcome = svc.save(&owner, "sprint", &ideas(&["b"]), false).await.unwrap();
        let SaveOutcome::Conflict(existing) = outcome else {
            panic!("expected conflict");
        };
        assert_eq!(existing.ideas[0].text, "a");
        // Nothing was written.
        let listed = svc.list(&owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].ideas[0].text, "a");
    }

    #[tokio::test]
    async fn test_save_overwrite_replaces_ideas_keeps_length() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "sprint", &ideas(&["a"]), false).await.unwrap();

        let outcome = svc.save(&owner, "sprint", &ideas(&["b", "c"]), true).await.unwrap();
        assert!(matches!(outcome, SaveOutcome::Replaced(_)));

        let listed = svc.list(&owner).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].ideas.len(), 2);
        assert_eq!(listed[0].ideas[0].text, "b");
    }

    #[tokio::test]
    async fn test_cap_evicts_oldest_first() {
        let svc = service();
        let owner = Uuid::new_v4();

        for i in 0..25 {
            svc.save(&owner, &format!("s{i}"), &[], false).await.unwrap();
        }

        let listed = svc.list(&owner).await.unwrap();
        assert_eq!(listed.len(), MAX_SESSIONS);
        // Most recent first; the five oldest (s0..s4) are gone.
        assert_eq!(listed[0].name, "s24");
        assert!(listed.iter().all(|s| s.name != "s0" && s.name != "s4"));
        assert!(listed.iter().any(|s| s.name == "s5"));
    }

    #[tokio::test]
    async fn test_owner_scoping_in_listings() {
        let svc = service();
        let u1 = Uuid::new_v4();
        let u2 = Uuid::new_v4();
        svc.save(&u1, "A", &[], false).await.unwrap();
        svc.save(&u2, "B", &[], false).await.unwrap();

        let listed = svc.list(&u1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "A");
    }

    #[tokio::test]
    async fn test_load_marks_active() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "sprint", &ideas(&["a"]), false).await.unwrap();

        let session = svc.load(&owner, "sprint").await.unwrap().unwrap();
        let active = svc.active().await.unwrap().unwrap();
        assert_eq!(active.id, session.id);
        assert_eq!(active.name, "sprint");
    }

    #[tokio::test]
    async fn test_load_unknown_name_is_none() {
        let svc = service();
        let owner = Uuid::new_v4();
        assert!(svc.load(&owner, "nope").await.unwrap().is_none());
        assert!(svc.active().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_active_clears_marker() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "sprint", &[], false).await.unwrap();
        let session = svc.load(&owner, "sprint").await.unwrap().unwrap();

        svc.delete(&owner, session.id).await.unwrap();
        assert!(svc.active().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_other_keeps_marker() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "keep", &[], false).await.unwrap();
        svc.save(&owner, "drop", &[], false).await.unwrap();
        svc.load(&owner, "keep").await.unwrap();

        let drop_id = svc
            .list(&owner)
            .await
            .unwrap()
            .iter()
            .find(|s| s.name == "drop")
            .unwrap()
            .id;
        svc.delete(&owner, drop_id).await.unwrap();

        let active = svc.active().await.unwrap().unwrap();
        assert_eq!(active.name, "keep");
    }

    #[tokio::test]
    async fn test_rename_without_active_is_noop() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "sprint", &[], false).await.unwrap();

        let outcome = svc.rename(&owner, "renamed").await.unwrap();
        assert_eq!(outcome, RenameOutcome::NoActiveSession);
        assert_eq!(svc.list(&owner).await.unwrap()[0].name, "sprint");
    }

    #[tokio::test]
    async fn test_rename_active_updates_rows_and_marker() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "sprint", &[], false).await.unwrap();
        svc.load(&owner, "sprint").await.unwrap();

        let outcome = svc.rename(&owner, "retro").await.unwrap();
        assert_eq!(
            outcome,
            RenameOutcome::Renamed {
                from: "sprint".to_string(),
                to: "retro".to_string()
            }
        );
        assert_eq!(svc.list(&owner).await.unwrap()[0].name, "retro");
        assert_eq!(svc.active().await.unwrap().unwrap().name, "retro");
    }

    #[tokio::test]
    async fn test_import_valid_tags_current_owner() {
        let svc = service();
        let owner = Uuid::new_v4();
        let raw = r#"{"id": 42, "name": "imported", "ideas": [{"id": 1, "text": "a"}]}"#;

        let session = svc.import(&owner, raw).await.unwrap();
        assert_eq!(session.owner, owner);
        assert_eq!(svc.list(&owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_reimport_of_own_export_gets_fresh_id() {
        let svc = service();
        let owner = Uuid::new_v4();
        let raw = r#"{"id": 42, "name": "imported", "ideas": [{"id": 1, "text": "a"}]}"#;

        // Importing the same file twice must not reuse the file's id, so a
        // round trip through export while the session still exists works.
        let first = svc.import(&owner, raw).await.unwrap();
        let second = svc.import(&owner, raw).await.unwrap();
        assert_ne!(first.id, 42);
        assert_ne!(first.id, second.id);
        assert_eq!(svc.list(&owner).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_invalid_leaves_list_unchanged() {
        let svc = service();
        let owner = Uuid::new_v4();
        svc.save(&owner, "existing", &[], false).await.unwrap();

        let err = svc
            .import(&owner, r#"{"name": "x", "ideas": []}"#)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ImportFailure::Invalid(ImportError::MissingField("id"))
        ));
        assert_eq!(svc.list(&owner).await.unwrap().len(), 1);
    }
}
