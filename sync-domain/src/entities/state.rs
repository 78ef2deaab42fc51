// Cross-run processed-event state
// Remembers what was already submitted, independent of what the calendar
// API chooses to expose (pending events are often hidden)

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Pending,
    Approved,
    Rejected,
    Processed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedEventState {
    pub event_hash: String,
    #[serde(default)]
    pub remote_id: Option<i64>,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub source: String,
    pub status: EventStatus,
}

/// In-memory map of content hash to processed state, loaded at run start and
/// persisted at run end through a `StateRepository`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessedEvents {
    entries: HashMap<String, ProcessedEventState>,
}

impl ProcessedEvents {
    pub fn is_processed(&self, event_hash: &str) -> bool {
        self.entries.contains_key(event_hash)
    }

    pub fn get(&self, event_hash: &str) -> Option<&ProcessedEventState> {
        self.entries.get(event_hash)
    }

    pub fn record(&mut self, state: ProcessedEventState) {
        self.entries.insert(state.event_hash.clone(), state);
    }

    /// Refresh `last_seen` on a re-sighting so active events survive pruning.
    pub fn touch(&mut self, event_hash: &str, seen_at: DateTime<Utc>) {
        if let Some(entry) = self.entries.get_mut(event_hash) {
            entry.last_seen = seen_at;
        }
    }

    pub fn update_status(&mut self, event_hash: &str, status: EventStatus, remote_id: Option<i64>) {
        if let Some(entry) = self.entries.get_mut(event_hash) {
            entry.status = status;
            if remote_id.is_some() {
                entry.remote_id = remote_id;
            }
        }
    }

    /// Drop entries not seen within the retention window. Returns how many
    /// were removed.
    pub fn prune(&mut self, retention_days: u32, now: DateTime<Utc>) -> usize {
        let cutoff = now - Duration::days(i64::from(retention_days));
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.last_seen > cutoff);
        before - self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entry(hash: &str, last_seen: DateTime<Utc>) -> ProcessedEventState {
        ProcessedEventState {
            event_hash: hash.to_string(),
            remote_id: None,
            first_seen: last_seen,
            last_seen,
            source: "willspub".to_string(),
            status: EventStatus::Pending,
        }
    }

    #[test]
    fn prune_drops_stale_entries_only() {
        let now = Utc::now();
        let mut state = ProcessedEvents::default();
        state.record(entry("fresh", now - Duration::days(5)));
        state.record(entry("stale", now - Duration::days(45)));

        let removed = state.prune(30, now);
        assert_eq!(removed, 1);
        assert!(state.is_processed("fresh"));
        assert!(!state.is_processed("stale"));
    }

    #[test]
    fn touch_extends_retention() {
        let now = Utc::now();
        let mut state = ProcessedEvents::default();
        state.record(entry("a", now - Duration::days(29)));
        state.touch("a", now);
        assert_eq!(state.prune(30, now + Duration::days(2)), 0);
    }

    #[test]
    fn update_status_keeps_existing_remote_id() {
        let now = Utc::now();
        let mut state = ProcessedEvents::default();
        let mut first = entry("a", now);
        first.remote_id = Some(42);
        state.record(first);

        state.update_status("a", EventStatus::Approved, None);
        let entry = state.get("a").unwrap();
        assert_eq!(entry.status, EventStatus::Approved);
        assert_eq!(entry.remote_id, Some(42));
    }
}
