// Existing-state index
// Rebuilt from the remote calendar every run, then updated incrementally as
// the batch creates events so later candidates in the same batch match

use std::collections::HashMap;

use crate::entities::RemoteEvent;
use crate::services::fingerprint::remote_fingerprint;

#[derive(Debug, Default)]
pub struct ExistingEventIndex {
    by_content_hash: HashMap<String, RemoteEvent>,
    by_composite_key: HashMap<String, Vec<RemoteEvent>>,
    count: usize,
}

impl ExistingEventIndex {
    pub fn build(remote_events: Vec<RemoteEvent>) -> Self {
        let mut index = Self::default();
        for event in remote_events {
            index.insert(event);
        }
        index
    }

    pub fn insert(&mut self, event: RemoteEvent) {
        let fingerprint = remote_fingerprint(&event);
        self.by_content_hash
            .entry(fingerprint.content_hash)
            .or_insert_with(|| event.clone());
        self.by_composite_key
            .entry(fingerprint.composite_key)
            .or_default()
            .push(event);
        self.count += 1;
    }

    pub fn by_content_hash(&self, hash: &str) -> Option<&RemoteEvent> {
        self.by_content_hash.get(hash)
    }

    pub fn by_composite_key(&self, key: &str) -> &[RemoteEvent] {
        self.by_composite_key
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn events(&self) -> impl Iterator<Item = &RemoteEvent> {
        self.by_composite_key.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}
