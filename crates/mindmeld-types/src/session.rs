//! Session types for MindMeld.
//!
//! A session is a named, persisted snapshot of the idea board. Sessions are
//! scoped to an owner: a user only ever sees sessions whose `owner` equals
//! its own id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::idea::Idea;

/// Maximum number of sessions retained per owner (oldest evicted first).
pub const MAX_SESSIONS: usize = 20;

/// A named, persisted snapshot of the idea board.
///
/// `(name, owner)` is the uniqueness key: saving under an existing name
/// replaces that session's ideas in place. Ids are millisecond timestamps,
/// the same convention as [`Idea::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub owner: Uuid,
    pub name: String,
    pub ideas: Vec<Idea>,
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session stamped with the current time.
    pub fn new(owner: Uuid, name: impl Into<String>, ideas: Vec<Idea>) -> Self {
        Self {
            id: crate::id::next_timestamp_id(),
            owner,
            name: name.into(),
            ideas,
            created_at: Utc::now(),
        }
    }
}

/// The session currently loaded on the board, if any.
///
/// Persisted under its own storage key so delete/rename can tell whether
/// they touched the active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveSession {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_new_stamps_id_and_created_at() {
        let before = Utc::now().timestamp_millis();
        let session = Session::new(Uuid::new_v4(), "sprint", vec![]);
        assert!(session.id >= before);
        assert!(session.created_at.timestamp_millis() >= before);
    }

    #[test]
    fn test_back_to_back_sessions_get_distinct_ids() {
        let owner = Uuid::new_v4();
        let a = Session::new(owner, "a", vec![]);
        let b = Session::new(owner, "b", vec![]);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_session_serde_roundtrip() {
        let session = Session::new(Uuid::new_v4(), "sprint", vec![Idea::new("a")]);
        let json = serde_json::to_string(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, session);
    }
}
