//! Storage trait seams.

pub mod kv_store;

pub use kv_store::KvStore;

/// Well-known keys in the device-level key-value store.
///
/// Kept wire-compatible with the keys the original browser build used in
/// local storage, so a migrated value dump is readable as-is.
pub mod keys {
    /// The active idea board (`Vec<Idea>`).
    pub const BOARD: &str = "mindmeld_board";
    /// Suggestion history (`Vec<HistoryEntry>`, capped).
    pub const HISTORY: &str = "mindmeld_history";
    /// Assistant conversation log (`Vec<Message>`).
    pub const ASSISTANT_HISTORY: &str = "mindmeld_assistant_history";
    /// Selected model identifier (string).
    pub const MODEL: &str = "mindmeld_model";
    /// Running focus countdown (`FocusState`).
    pub const FOCUS: &str = "mindmeld_focus";
    /// Session currently loaded on the board (`ActiveSession`).
    pub const ACTIVE_SESSION: &str = "mindmeld_active_session";
    /// Persisted anonymous device owner id (UUID string).
    pub const DEVICE_ID: &str = "mindmeld_device_id";
}
