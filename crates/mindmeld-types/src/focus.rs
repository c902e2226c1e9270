//! Focus-mode state for MindMeld.
//!
//! Focus mode is a timed countdown during which AI suggestions are
//! disabled. The state is persisted so any command can tell whether a
//! countdown is running, and how many ideas were added during it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Allowed focus durations, in minutes.
pub const FOCUS_PRESETS_MIN: &[u32] = &[5, 15, 25];

/// Default focus duration, in minutes.
pub const DEFAULT_FOCUS_MIN: u32 = 15;

/// A running (or elapsed) focus countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FocusState {
    pub started_at: DateTime<Utc>,
    pub duration_secs: u32,
    /// Ideas added to the board while this countdown was active.
    pub ideas_added: u32,
}

impl FocusState {
    /// Start a countdown now for the given number of minutes.
    pub fn start(minutes: u32) -> Self {
        Self {
            started_at: Utc::now(),
            duration_secs: minutes * 60,
            ideas_added: 0,
        }
    }

    /// Seconds remaining at `now`, zero once elapsed.
    pub fn remaining_secs(&self, now: DateTime<Utc>) -> u32 {
        let elapsed = (now - self.started_at).num_seconds().max(0) as u64;
        u64::from(self.duration_secs).saturating_sub(elapsed) as u32
    }

    /// Whether the countdown is still running at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.remaining_secs(now) > 0
    }
}

/// Format a second count as `MM:SS`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
