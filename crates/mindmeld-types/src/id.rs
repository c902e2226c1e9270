//! Millisecond-timestamp id generation.
//!
//! Ideas and sessions use millisecond timestamps as ids, the convention the
//! exported JSON format inherits. A bare clock read collides when several
//! entities are created within the same millisecond (a whole suggestion
//! batch, for instance), so ids are forced strictly increasing per process.

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_ID: AtomicI64 = AtomicI64::new(0);

/// Next strictly-increasing millisecond-timestamp id.
pub fn next_timestamp_id() -> i64 {
    let now = Utc::now().timestamp_millis();
    let prev = LAST_ID
        .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |last| {
            Some(last.max(now - 1) + 1)
        })
        .unwrap_or(now - 1);
    prev.max(now - 1) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_strictly_increasing() {
        let ids: Vec<i64> = (0..100).map(|_| next_timestamp_id()).collect();
        for pair in ids.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_ids_track_wall_clock() {
        let before = Utc::now().timestamp_millis();
        let id = next_timestamp_id();
        // Never behind the clock by more than prior same-millisecond bumps.
        assert!(id >= before);
    }
}
