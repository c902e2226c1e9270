//! SQLite key-value store implementation.
//!
//! Implements `KvStore` from `mindmeld-core` using sqlx with split read/write
//! pools. Values are stored as JSON text and deserialized on read.

use chrono::Utc;
use mindmeld_core::storage::kv_store::KvStore;
use mindmeld_types::error::RepositoryError;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `KvStore`.
#[derive(Clone)]
pub struct SqliteKvStore {
    pool: DatabasePool,
}

impl SqliteKvStore {
    /// Create a new KV store backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

impl KvStore for SqliteKvStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, RepositoryError> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let value_str: String = row
                    .try_get("value")
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                let value: serde_json::Value = serde_json::from_str(&value_str)
                    .map_err(|e| RepositoryError::Query(format!("invalid JSON value: {e}")))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &serde_json::Value) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        let value_str = serde_json::to_string(value)
            .map_err(|e| RepositoryError::Query(format!("failed to serialize value: {e}")))?;

        sqlx::query(
            r#"INSERT INTO kv_store (key, value, created_at, updated_at)
               VALUES (?, ?, ?, ?)
               ON CONFLICT (key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at"#,
        )
        .bind(key)
        .bind(&value_str)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM kv_store WHERE key = ?")
            .bind(key)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list_keys(&self) -> Result<Vec<String>, RepositoryError> {
        let rows = sqlx::query("SELECT key FROM kv_store ORDER BY key")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut keys = Vec::with_capacity(rows.len());
        for row in &rows {
            let key: String = row
                .try_get("key")
                .map_err(|e| RepositoryError::Query(e.to_string()))?;
            keys.push(key);
        }

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::DatabasePool;
    use mindmeld_core::storage::keys;

    // The TempDir guard is returned so the directory lives until the test
    // drops it.
    async fn test_store() -> (SqliteKvStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", db_path.display());
        (SqliteKvStore::new(DatabasePool::new(&url).await.unwrap()), dir)
    }

    #[tokio::test]
    async fn test_set_get_roundtrip() {
        let (store, _dir) = test_store().await;

        let value = serde_json::json!({"model": "mistral", "count": 3});
        store.set(keys::MODEL, &value).await.unwrap();

        let got = store.get(keys::MODEL).await.unwrap();
        assert_eq!(got, Some(value));
    }

    #[tokio::test]
    async fn test_get_nonexistent_returns_none() {
        let (store, _dir) = test_store().await;

        let got = store.get("missing").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_set_upserts() {
        let (store, _dir) = test_store().await;

        store.set("counter", &serde_json::json!(1)).await.unwrap();
        store.set("counter", &serde_json::json!(2)).await.unwrap();

        let got = store.get("counter").await.unwrap();
        assert_eq!(got, Some(serde_json::json!(2)));
    }

    #[tokio::test]
    async fn test_delete() {
        let (store, _dir) = test_store().await;

        store
            .set("temp", &serde_json::json!("value"))
            .await
            .unwrap();
        store.delete("temp").await.unwrap();

        let got = store.get("temp").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_noop() {
        let (store, _dir) = test_store().await;

        // Should not error
        store.delete("nope").await.unwrap();
    }

    #[tokio::test]
    async fn test_list_keys_sorted() {
        let (store, _dir) = test_store().await;

        store.set("beta", &serde_json::json!("b")).await.unwrap();
        store.set("alpha", &serde_json::json!("a")).await.unwrap();
        store.set("gamma", &serde_json::json!("g")).await.unwrap();

        let keys = store.list_keys().await.unwrap();
        assert_eq!(keys, vec!["alpha", "beta", "gamma"]);
    }

    #[tokio::test]
    async fn test_list_keys_empty() {
        let (store, _dir) = test_store().await;

        let keys = store.list_keys().await.unwrap();
        assert!(keys.is_empty());
    }

    #[tokio::test]
    async fn test_json_value_types() {
        let (store, _dir) = test_store().await;

        store
            .set("string", &serde_json::json!("hello"))
            .await
            .unwrap();
        assert_eq!(
            store.get("string").await.unwrap(),
            Some(serde_json::json!("hello"))
        );

        store.set("null", &serde_json::json!(null)).await.unwrap();
        assert_eq!(
            store.get("null").await.unwrap(),
            Some(serde_json::json!(null))
        );

        store
            .set("array", &serde_json::json!([1, "two", 3]))
            .await
            .unwrap();
        assert_eq!(
            store.get("array").await.unwrap(),
            Some(serde_json::json!([1, "two", 3]))
        );

        store
            .set("nested", &serde_json::json!({"a": {"b": {"c": true}}}))
            .await
            .unwrap();
        assert_eq!(
            store.get("nested").await.unwrap(),
            Some(serde_json::json!({"a": {"b": {"c": true}}}))
        );
    }
}
