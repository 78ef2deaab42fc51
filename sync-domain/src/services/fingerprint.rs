// Fingerprint generation
// Composite key for coarse duplicate grouping, SHA-256 content hash for
// exact-duplicate detection. Both deterministic for equal semantic input.

use serde_json::json;
use sha2::{Digest, Sha256};

use crate::entities::{CanonicalEvent, RemoteEvent};
use crate::services::normalizer::{normalize_title, normalize_venue};
use crate::utils::epoch_to_date;

/// How much of the description participates in the content hash.
const DESCRIPTION_HASH_PREFIX: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint {
    pub composite_key: String,
    pub content_hash: String,
}

pub fn fingerprint(event: &CanonicalEvent) -> Fingerprint {
    build(
        &event.normalized_title,
        &normalize_venue(&event.venue.name),
        event.start_at,
        &event.description,
    )
}

pub fn remote_fingerprint(event: &RemoteEvent) -> Fingerprint {
    let venue = event
        .place
        .as_ref()
        .map(|place| normalize_venue(&place.name))
        .unwrap_or_default();
    build(
        &normalize_title(&event.title),
        &venue,
        event.start_datetime,
        event.description.as_deref().unwrap_or(""),
    )
}

fn build(normalized_title: &str, normalized_venue: &str, start_at: i64, description: &str) -> Fingerprint {
    let composite_key = format!(
        "{}|{}|{}",
        normalized_title,
        normalized_venue,
        epoch_to_date(start_at)
    );

    let prefix: String = normalize_title(description)
        .chars()
        .take(DESCRIPTION_HASH_PREFIX)
        .collect();
    // serde_json object keys are BTreeMap-ordered, so the serialized record
    // is independent of field assembly order.
    let canonical = json!({
        "title": normalized_title,
        "venue": normalized_venue,
        "start_time": start_at,
        "description": prefix,
    });

    let mut hasher = Sha256::new();
    hasher.update(canonical.to_string().as_bytes());
    let digest = hasher.finalize();
    let mut content_hash = String::with_capacity(digest.len() * 2);
    for byte in digest {
        content_hash.push_str(&format!("{byte:02x}"));
    }

    Fingerprint {
        composite_key,
        content_hash,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{VenueRecord, DEFAULT_EVENT_DURATION_SECS};

    fn canonical(title: &str, venue: &str, start_at: i64, description: &str) -> CanonicalEvent {
        CanonicalEvent {
            title: title.to_string(),
            normalized_title: normalize_title(title),
            venue: VenueRecord {
                id: 1,
                name: venue.to_string(),
                address: String::new(),
                aliases: Vec::new(),
                markers: Vec::new(),
            },
            start_at,
            end_at: start_at + DEFAULT_EVENT_DURATION_SECS,
            description: description.to_string(),
            tags: Vec::new(),
            source: "test".to_string(),
        }
    }

    // 2025-08-20T19:00:00Z
    const START: i64 = 1755716400;

    #[test]
    fn composite_key_ignores_case_and_time_of_day() {
        let a = fingerprint(&canonical("Teenage Bottlerocket", "Will's Pub", START, ""));
        let b = fingerprint(&canonical(
            "TEENAGE  BOTTLEROCKET",
            "will's pub",
            START + 7200,
            "",
        ));
        assert_eq!(a.composite_key, b.composite_key);
        assert_eq!(a.composite_key, "teenage bottlerocket|will's pub|2025-08-20");
    }

    #[test]
    fn content_hash_is_deterministic() {
        let a = fingerprint(&canonical("Night Witch", "Conduit", START, "doors at 7"));
        let b = fingerprint(&canonical("Night Witch", "Conduit", START, "doors at 7"));
        assert_eq!(a.content_hash, b.content_hash);
        assert_eq!(a.content_hash.len(), 64);
    }

    #[test]
    fn content_hash_sees_time_of_day() {
        let a = fingerprint(&canonical("Night Witch", "Conduit", START, ""));
        let b = fingerprint(&canonical("Night Witch", "Conduit", START + 3600, ""));
        assert_ne!(a.content_hash, b.content_hash);
    }

    #[test]
    fn description_beyond_prefix_is_ignored() {
        let long_a = format!("{}{}", "x ".repeat(150), "tail one");
        let long_b = format!("{}{}", "x ".repeat(150), "tail two");
        let a = fingerprint(&canonical("A", "V", START, &long_a));
        let b = fingerprint(&canonical("A", "V", START, &long_b));
        assert_eq!(a.content_hash, b.content_hash);
    }

    #[test]
    fn remote_and_canonical_agree() {
        let event = canonical("Night Witch", "Conduit", START, "doors at 7");
        let remote = RemoteEvent {
            id: 9,
            title: "Night  Witch".to_string(),
            place: Some(crate::entities::RemotePlace {
                id: 5,
                name: "CONDUIT".to_string(),
            }),
            start_datetime: START,
            end_datetime: None,
            description: Some("Doors at 7".to_string()),
        };
        assert_eq!(fingerprint(&event), remote_fingerprint(&remote));
    }
}
