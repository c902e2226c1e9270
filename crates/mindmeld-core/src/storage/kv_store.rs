//! Key-value store trait.
//!
//! Defines the interface for the device-level key-value store backing the
//! board, suggestion history, assistant log, and UI preferences.
//! Implementations live in mindmeld-infra.

use mindmeld_types::error::RepositoryError;

/// Trait for device-level key-value persistent storage.
///
/// Stores arbitrary JSON values under string keys (see
/// [`crate::storage::keys`]). Uses RPITIT (native async fn in traits).
/// Writes are best-effort upserts; there is no transactional grouping
/// across keys.
pub trait KvStore: Send + Sync {
    /// Get a value by key. Returns None if the key does not exist.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<serde_json::Value>, RepositoryError>> + Send;

    /// Set a value for a key (upsert).
    fn set(
        &self,
        key: &str,
        value: &serde_json::Value,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a key. No-op if the key does not exist.
    fn delete(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// List all stored keys.
    fn list_keys(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<String>, RepositoryError>> + Send;
}

/// Read a key and deserialize it, falling back to `T::default()` when the
/// key is absent.
pub async fn get_or_default<T, K>(kv: &K, key: &str) -> Result<T, RepositoryError>
where
    T: serde::de::DeserializeOwned + Default,
    K: KvStore,
{
    match kv.get(key).await? {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| RepositoryError::Query(format!("corrupt value under '{key}': {e}"))),
        None => Ok(T::default()),
    }
}

/// Serialize and store a value under a key.
pub async fn set_json<T, K>(kv: &K, key: &str, value: &T) -> Result<(), RepositoryError>
where
    T: serde::Serialize,
    K: KvStore,
{
    let value = serde_json::to_value(value)
        .map_err(|e| RepositoryError::Query(format!("failed to serialize '{key}': {e}")))?;
    kv.set(key, &value).await
}
