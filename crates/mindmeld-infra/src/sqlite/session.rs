//! SQLite session repository implementation.
//!
//! Implements `SessionRepository` from `mindmeld-core`. Ideas are stored as
//! a JSON array in a single text column; the row id is the session's
//! millisecond timestamp id.

use chrono::{DateTime, Utc};
use mindmeld_core::session::repository::SessionRepository;
use mindmeld_types::error::RepositoryError;
use mindmeld_types::idea::Idea;
use mindmeld_types::session::Session;
use sqlx::Row;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `SessionRepository`.
#[derive(Clone)]
pub struct SqliteSessionRepository {
    pool: DatabasePool,
}

impl SqliteSessionRepository {
    /// Create a new session repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct SessionRow {
    id: i64,
    owner: String,
    name: String,
    ideas: String,
    created_at: String,
}

impl SessionRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            owner: row.try_get("owner")?,
            name: row.try_get("name")?,
            ideas: row.try_get("ideas")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_session(self) -> Result<Session, RepositoryError> {
        let owner = Uuid::parse_str(&self.owner)
            .map_err(|e| RepositoryError::Query(format!("invalid owner: {e}")))?;
        let ideas: Vec<Idea> = serde_json::from_str(&self.ideas)
            .map_err(|e| RepositoryError::Query(format!("invalid ideas JSON: {e}")))?;
        let created_at = parse_datetime(&self.created_at)?;

        Ok(Session {
            id: self.id,
            owner,
            name: self.name,
            ideas,
            created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

fn serialize_ideas(ideas: &[Idea]) -> Result<String, RepositoryError> {
    serde_json::to_string(ideas)
        .map_err(|e| RepositoryError::Query(format!("failed to serialize ideas: {e}")))
}

// ---------------------------------------------------------------------------
// SessionRepository implementation
// ---------------------------------------------------------------------------

impl SessionRepository for SqliteSessionRepository {
    async fn list(&self, owner: &Uuid) -> Result<Vec<Session>, RepositoryError> {
        let rows = sqlx::query(
            "SELECT * FROM sessions WHERE owner = ? ORDER BY created_at DESC, id DESC",
        )
        .bind(owner.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                SessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }

        Ok(sessions)
    }

    async fn find_by_name(
        &self,
        owner: &Uuid,
        name: &str,
    ) -> Result<Option<Session>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM sessions WHERE owner = ? AND name = ?")
            .bind(owner.to_string())
            .bind(name)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row =
                    SessionRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn insert(&self, session: &Session) -> Result<(), RepositoryError> {
        let ideas = serialize_ideas(&session.ideas)?;

        sqlx::query(
            "INSERT INTO sessions (id, owner, name, ideas, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(session.id)
        .bind(session.owner.to_string())
        .bind(&session.name)
        .bind(&ideas)
        .bind(session.created_at.to_rfc3339())
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn replace_ideas(
        &self,
        owner: &Uuid,
        id: i64,
        ideas: &[Idea],
    ) -> Result<(), RepositoryError> {
        let ideas = serialize_ideas(ideas)?;

        let result = sqlx::query("UPDATE sessions SET ideas = ? WHERE owner = ? AND id = ?")
            .bind(&ideas)
            .bind(owner.to_string())
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn rename(
        &self,
        owner: &Uuid,
        old_name: &str,
        new_name: &str,
    ) -> Result<u64, RepositoryError> {
        let result = sqlx::query("UPDATE sessions SET name = ? WHERE owner = ? AND name = ?")
            .bind(new_name)
            .bind(owner.to_string())
            .bind(old_name)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, owner: &Uuid, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE owner = ? AND id = ?")
            .bind(owner.to_string())
            .bind(id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;

    // The TempDir guard is returned so the directory lives until the test
    // drops it.
    async fn test_repo() -> (SqliteSessionRepository, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        let repo = SqliteSessionRepository::new(DatabasePool::new(&url).await.unwrap());
        (repo, dir)
    }

    fn session(owner: Uuid, name: &str, ideas: Vec<&str>) -> Session {
        Session::new(owner, name, ideas.into_iter().map(Idea::new).collect())
    }

    #[tokio::test]
    async fn test_insert_and_find_by_name() {
        let (repo, _dir) = test_repo().await;
        let owner = Uuid::new_v4();

        let s = session(owner, "sprint", vec!["solar kiosk", "rain sensor"]);
        repo.insert(&s).await.unwrap();

        let found = repo.find_by_name(&owner, "sprint").await.unwrap().unwrap();
        assert_eq!(found, s);
    }

    #[tokio::test]
    async fn test_find_by_name_missing_returns_none() {
        let (repo, _dir) = test_repo().await;

        let found = repo.find_by_name(&Uuid::new_v4(), "nope").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_most_recent_first() {
        let (repo, _dir) = test_repo().await;
        let owner = Uuid::new_v4();

        let a = session(owner, "first", vec![]);
        let b = session(owner, "second", vec![]);
        let c = session(owner, "third", vec![]);
        repo.insert(&a).await.unwrap();
        repo.insert(&b).await.unwrap();
        repo.insert(&c).await.unwrap();

        let names: Vec<String> = repo
            .list(&owner)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["third", "second", "first"]);
    }

    #[tokio::test]
    async fn test_list_scoped_to_owner() {
        let (repo, _dir) = test_repo().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        repo.insert(&session(alice, "mine", vec![])).await.unwrap();
        repo.insert(&session(bob, "theirs", vec![])).await.unwrap();

        let mine = repo.list(&alice).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "mine");

        assert!(repo.find_by_name(&alice, "theirs").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_ideas() {
        let (repo, _dir) = test_repo().await;
        let owner = Uuid::new_v4();

        let s = session(owner, "sprint", vec!["old"]);
        repo.insert(&s).await.unwrap();

        let new_ideas = vec![Idea::new("new one"), Idea::new("new two")];
        repo.replace_ideas(&owner, s.id, &new_ideas).await.unwrap();

        let found = repo.find_by_name(&owner, "sprint").await.unwrap().unwrap();
        assert_eq!(found.ideas, new_ideas);
    }

    #[tokio::test]
    async fn test_replace_ideas_missing_is_not_found() {
        let (repo, _dir) = test_repo().await;

        let err = repo
            .replace_ideas(&Uuid::new_v4(), 12345, &[])
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_rename_counts_rows() {
        let (repo, _dir) = test_repo().await;
        let owner = Uuid::new_v4();

        repo.insert(&session(owner, "draft", vec![])).await.unwrap();

        let renamed = repo.rename(&owner, "draft", "final").await.unwrap();
        assert_eq!(renamed, 1);

        assert!(repo.find_by_name(&owner, "draft").await.unwrap().is_none());
        assert!(repo.find_by_name(&owner, "final").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rename_missing_is_zero_not_error() {
        let (repo, _dir) = test_repo().await;

        let renamed = repo
            .rename(&Uuid::new_v4(), "nope", "still-nope")
            .await
            .unwrap();
        assert_eq!(renamed, 0);
    }

    #[tokio::test]
    async fn test_delete() {
        let (repo, _dir) = test_repo().await;
        let owner = Uuid::new_v4();

        let s = session(owner, "temp", vec![]);
        repo.insert(&s).await.unwrap();
        repo.delete(&owner, s.id).await.unwrap();

        assert!(repo.list(&owner).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let (repo, _dir) = test_repo().await;

        let err = repo.delete(&Uuid::new_v4(), 99).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
    }

    #[tokio::test]
    async fn test_delete_scoped_to_owner() {
        let (repo, _dir) = test_repo().await;
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        let s = session(alice, "mine", vec![]);
        repo.insert(&s).await.unwrap();

        let err = repo.delete(&bob, s.id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound));
        assert_eq!(repo.list(&alice).await.unwrap().len(), 1);
    }
}
