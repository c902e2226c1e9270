//! Idea and suggestion-history types for MindMeld.

use serde::{Deserialize, Serialize};

use crate::id::next_timestamp_id;

/// A single user- or AI-contributed text note on the board.
///
/// Immutable once created; removed only by clearing or replacing the board.
/// Ids are millisecond timestamps, matching the JSON shape produced by
/// earlier exports so old session files import cleanly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    pub id: i64,
    pub text: String,
}

impl Idea {
    /// Create an idea stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: next_timestamp_id(),
            text: text.into(),
        }
    }
}

/// One entry in the suggestion history.
///
/// The history keeps the 50 most recent accepted AI suggestions so they
/// can be re-added to a later board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub text: String,
}

impl HistoryEntry {
    /// Create a history entry stamped with the current time.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: next_timestamp_id(),
            text: text.into(),
        }
    }
}

/// Maximum number of suggestion history entries retained.
pub const HISTORY_CAP: usize = 50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idea_serde_shape() {
        let idea = Idea {
            id: 1_700_000_000_000,
            text: "Build a prototype".to_string(),
        };
        let json = serde_json::to_string(&idea).unwrap();
        assert_eq!(json, r#"{"id":1700000000000,"text":"Build a prototype"}"#);
        let parsed: Idea = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, idea);
    }

    #[test]
    fn test_idea_new_stamps_current_millis() {
        let before = chrono::Utc::now().timestamp_millis();
        let idea = Idea::new("x");
        assert!(idea.id >= before);
    }

    #[test]
    fn test_batch_of_ideas_gets_distinct_ids() {
        let batch: Vec<Idea> = (0..10).map(|_| Idea::new("same millisecond")).collect();
        for pair in batch.windows(2) {
            assert_ne!(pair[0].id, pair[1].id);
        }
    }
}
