//! Exposure tracking for anti-repeat reranking.
//!
//! Tracks (viewer, candidate) pairs with a total count and last-shown
//! timestamp, plus a bounded per-viewer recency list for the
//! "last 50 impressions" rule. Stores are constructed explicitly and
//! injected through `AppState`; tests and multiple tenants get isolated
//! instances.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

pub const MAX_RECENT_IMPRESSIONS: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct ImpressionRecord {
    pub count: u64,
    pub last_shown: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct StoreInner {
    impressions: HashMap<(String, String), ImpressionRecord>,
    recent_per_viewer: HashMap<String, VecDeque<String>>,
}

/// One global lock per store; contention is a handful of concurrent
/// requests per viewer at most, and writes must be serialized per viewer
/// so the recency list never loses updates.
#[derive(Debug, Default)]
pub struct ImpressionStore {
    inner: Mutex<StoreInner>,
}

impl ImpressionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn record_impression(&self, viewer_id: &str, candidate_id: &str) {
        let mut inner = self.locked();

        let record = inner
            .impressions
            .entry((viewer_id.to_string(), candidate_id.to_string()))
            .or_default();
        record.count += 1;
        record.last_shown = Some(Utc::now());

        // Re-exposure moves the candidate to the most-recent slot rather
        // than duplicating it.
        let recent = inner
            .recent_per_viewer
            .entry(viewer_id.to_string())
            .or_default();
        if let Some(pos) = recent.iter().position(|c| c == candidate_id) {
            recent.remove(pos);
        }
        recent.push_back(candidate_id.to_string());
        while recent.len() > MAX_RECENT_IMPRESSIONS {
            recent.pop_front();
        }
    }

    /// Unseen pairs come back as a zero-valued record, never an error.
    pub fn get_impression(&self, viewer_id: &str, candidate_id: &str) -> ImpressionRecord {
        self.locked()
            .impressions
            .get(&(viewer_id.to_string(), candidate_id.to_string()))
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_recently_shown(
        &self,
        viewer_id: &str,
        candidate_id: &str,
        within_last_n: usize,
    ) -> bool {
        let inner = self.locked();
        let Some(recent) = inner.recent_per_viewer.get(viewer_id) else {
            return false;
        };
        recent
            .iter()
            .rev()
            .take(within_last_n)
            .any(|c| c == candidate_id)
    }

    pub fn was_shown_within_days(&self, viewer_id: &str, candidate_id: &str, days: i64) -> bool {
        let record = self.get_impression(viewer_id, candidate_id);
        match record.last_shown {
            Some(last_shown) => last_shown >= Utc::now() - Duration::days(days),
            None => false,
        }
    }

    /// Test/ops reset.
    pub fn clear(&self) {
        let mut inner = self.locked();
        inner.impressions.clear();
        inner.recent_per_viewer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unseen_pair_is_zero_valued() {
        let store = ImpressionStore::new();
        let record = store.get_impression("v", "c");
        assert_eq!(record.count, 0);
        assert!(record.last_shown.is_none());
        assert!(!store.is_recently_shown("v", "c", 50));
        assert!(!store.was_shown_within_days("v", "c", 7));
    }

    #[test]
    fn record_updates_count_and_last_shown() {
        let store = ImpressionStore::new();
        store.record_impression("v", "c");
        store.record_impression("v", "c");

        let record = store.get_impression("v", "c");
        assert_eq!(record.count, 2);
        assert!(record.last_shown.is_some());
        assert!(store.is_recently_shown("v", "c", 50));
        assert!(store.was_shown_within_days("v", "c", 1));
    }

    #[test]
    fn recency_list_caps_at_fifty() {
        let store = ImpressionStore::new();
        store.record_impression("v", "c");

        // 50 further distinct candidates push "c" out of the window.
        for i in 0..MAX_RECENT_IMPRESSIONS {
            store.record_impression("v", &format!("other_{}", i));
        }

        assert!(!store.is_recently_shown("v", "c", 50));
        assert!(store.is_recently_shown("v", "other_49", 50));
        // The pair record itself survives the recency-list eviction.
        assert_eq!(store.get_impression("v", "c").count, 1);
    }

    #[test]
    fn repeat_exposure_does_not_age_out_early() {
        let store = ImpressionStore::new();
        // 51 impressions of the same candidate occupy one slot, not 51.
        for _ in 0..51 {
            store.record_impression("v", "c");
        }
        store.record_impression("v", "d");

        assert!(store.is_recently_shown("v", "c", 50));
        assert!(store.is_recently_shown("v", "d", 50));
        assert_eq!(store.get_impression("v", "c").count, 51);
    }

    #[test]
    fn narrower_window_excludes_older_entries() {
        let store = ImpressionStore::new();
        store.record_impression("v", "a");
        store.record_impression("v", "b");
        store.record_impression("v", "c");

        assert!(store.is_recently_shown("v", "a", 3));
        assert!(!store.is_recently_shown("v", "a", 2));
        assert!(store.is_recently_shown("v", "c", 1));
    }

    #[test]
    fn viewers_are_isolated() {
        let store = ImpressionStore::new();
        store.record_impression("v1", "c");
        assert!(!store.is_recently_shown("v2", "c", 50));
        assert_eq!(store.get_impression("v2", "c").count, 0);
    }

    #[test]
    fn clear_resets_everything() {
        let store = ImpressionStore::new();
        store.record_impression("v", "c");
        store.clear();
        assert_eq!(store.get_impression("v", "c").count, 0);
        assert!(!store.is_recently_shown("v", "c", 50));
    }
}
