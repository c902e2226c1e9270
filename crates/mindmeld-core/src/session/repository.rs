//! Session repository trait.
//!
//! The single write path for session persistence. Two implementations live
//! in mindmeld-infra: a local SQLite table (the offline-first default) and
//! the hosted remote session store. Exactly one backend is active at a time,
//! selected by configuration.

use mindmeld_types::error::RepositoryError;
use mindmeld_types::idea::Idea;
use mindmeld_types::session::Session;
use uuid::Uuid;

/// Trait for session persistence.
///
/// All reads are scoped by `owner`; an implementation must never return a
/// session belonging to a different owner. Listing order is creation time
/// descending (most recent first). Uses RPITIT (native async fn in traits).
pub trait SessionRepository: Send + Sync {
    /// List sessions for an owner, most recent first.
    fn list(
        &self,
        owner: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<Session>, RepositoryError>> + Send;

    /// Find a session by `(name, owner)`. Returns None if absent.
    fn find_by_name(
        &self,
        owner: &Uuid,
        name: &str,
    ) -> impl std::future::Future<Output = Result<Option<Session>, RepositoryError>> + Send;

    /// Insert a new session row.
    fn insert(
        &self,
        session: &Session,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Replace the ideas of an existing session in place.
    ///
    /// Returns `RepositoryError::NotFound` if no row matches `id`.
    fn replace_ideas(
        &self,
        owner: &Uuid,
        id: i64,
        ideas: &[Idea],
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Rename every session matching `(old_name, owner)`.
    ///
    /// Returns the number of rows renamed (zero is not an error).
    fn rename(
        &self,
        owner: &Uuid,
        old_name: &str,
        new_name: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Delete a session by id.
    ///
    /// Returns `RepositoryError::NotFound` if no row matches.
    fn delete(
        &self,
        owner: &Uuid,
        id: i64,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;
}
