// Duplicate resolution
// One ordered chain of interchangeable strategies, short-circuiting at the
// first match. New strategies slot in without touching existing ones.

use std::fmt;

use crate::entities::{CanonicalEvent, EventStatus, ProcessedEvents, RemoteEvent};
use crate::services::fingerprint::Fingerprint;
use crate::services::index::ExistingEventIndex;
use crate::services::normalizer::{normalize_title, normalize_venue};
use crate::utils::epoch_to_date;

pub struct MatchContext<'a> {
    pub index: &'a ExistingEventIndex,
    pub state: &'a ProcessedEvents,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchReason {
    ExactContent,
    CompositeKey,
    SimilarTitle(f64),
    CrossScan(f64),
    AlreadyProcessed(EventStatus),
}

impl fmt::Display for MatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchReason::ExactContent => write!(f, "exact content match"),
            MatchReason::CompositeKey => write!(f, "composite key match"),
            MatchReason::SimilarTitle(score) => write!(f, "similar title ({score:.2})"),
            MatchReason::CrossScan(score) => write!(f, "venue/date fuzzy match ({score:.2})"),
            MatchReason::AlreadyProcessed(status) => {
                write!(f, "already processed ({status:?})")
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DuplicateMatch {
    pub reason: MatchReason,
    pub remote: Option<RemoteEvent>,
    pub remote_id: Option<i64>,
}

impl DuplicateMatch {
    fn remote(reason: MatchReason, event: &RemoteEvent) -> Self {
        Self {
            reason,
            remote_id: Some(event.id),
            remote: Some(event.clone()),
        }
    }
}

/// Similarity of two already-normalized titles, 0.0 to 1.0.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    strsim::jaro_winkler(a, b)
}

pub trait MatchStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn evaluate(
        &self,
        event: &CanonicalEvent,
        fingerprint: &Fingerprint,
        ctx: &MatchContext<'_>,
    ) -> Option<DuplicateMatch>;
}

/// Tier 1: exact content hash. Highest confidence.
pub struct ContentHashStrategy;

impl MatchStrategy for ContentHashStrategy {
    fn name(&self) -> &'static str {
        "content_hash"
    }

    fn evaluate(
        &self,
        _event: &CanonicalEvent,
        fingerprint: &Fingerprint,
        ctx: &MatchContext<'_>,
    ) -> Option<DuplicateMatch> {
        ctx.index
            .by_content_hash(&fingerprint.content_hash)
            .map(|existing| DuplicateMatch::remote(MatchReason::ExactContent, existing))
    }
}

/// Tier 2: composite key. A lone candidate is taken as-is; several
/// candidates sharing the key are disambiguated by title similarity.
pub struct CompositeKeyStrategy {
    pub threshold: f64,
}

impl MatchStrategy for CompositeKeyStrategy {
    fn name(&self) -> &'static str {
        "composite_key"
    }

    fn evaluate(
        &self,
        event: &CanonicalEvent,
        fingerprint: &Fingerprint,
        ctx: &MatchContext<'_>,
    ) -> Option<DuplicateMatch> {
        let candidates = ctx.index.by_composite_key(&fingerprint.composite_key);
        match candidates {
            [] => None,
            [only] => Some(DuplicateMatch::remote(MatchReason::CompositeKey, only)),
            several => several.iter().find_map(|candidate| {
                let score =
                    title_similarity(&event.normalized_title, &normalize_title(&candidate.title));
                (score >= self.threshold)
                    .then(|| DuplicateMatch::remote(MatchReason::SimilarTitle(score), candidate))
            }),
        }
    }
}

/// Tier 3: last-resort scan over indexed events at the same venue on the
/// same calendar date, with a looser similarity threshold.
pub struct CrossScanStrategy {
    pub threshold: f64,
}

impl MatchStrategy for CrossScanStrategy {
    fn name(&self) -> &'static str {
        "cross_scan"
    }

    fn evaluate(
        &self,
        event: &CanonicalEvent,
        _fingerprint: &Fingerprint,
        ctx: &MatchContext<'_>,
    ) -> Option<DuplicateMatch> {
        let venue = normalize_venue(&event.venue.name);
        let date = epoch_to_date(event.start_at);

        ctx.index.events().find_map(|existing| {
            let existing_venue = existing
                .place
                .as_ref()
                .map(|place| normalize_venue(&place.name))
                .unwrap_or_default();
            if existing_venue != venue || epoch_to_date(existing.start_datetime) != date {
                return None;
            }
            let score =
                title_similarity(&event.normalized_title, &normalize_title(&existing.title));
            (score >= self.threshold)
                .then(|| DuplicateMatch::remote(MatchReason::CrossScan(score), existing))
        })
    }
}

/// Tier 4: persistent-state fingerprint. Catches events the remote system
/// hides while they await moderation, so it runs even when the index knows
/// nothing.
pub struct ProcessedStateStrategy;

impl MatchStrategy for ProcessedStateStrategy {
    fn name(&self) -> &'static str {
        "processed_state"
    }

    fn evaluate(
        &self,
        _event: &CanonicalEvent,
        fingerprint: &Fingerprint,
        ctx: &MatchContext<'_>,
    ) -> Option<DuplicateMatch> {
        ctx.state
            .get(&fingerprint.content_hash)
            .map(|entry| DuplicateMatch {
                reason: MatchReason::AlreadyProcessed(entry.status),
                remote: None,
                remote_id: entry.remote_id,
            })
    }
}

pub struct DuplicateResolver {
    strategies: Vec<Box<dyn MatchStrategy>>,
}

impl DuplicateResolver {
    pub fn new(same_key_threshold: f64, cross_scan_threshold: f64) -> Self {
        Self::with_strategies(vec![
            Box::new(ContentHashStrategy),
            Box::new(CompositeKeyStrategy {
                threshold: same_key_threshold,
            }),
            Box::new(CrossScanStrategy {
                threshold: cross_scan_threshold,
            }),
            Box::new(ProcessedStateStrategy),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn MatchStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn find_duplicate(
        &self,
        event: &CanonicalEvent,
        fingerprint: &Fingerprint,
        ctx: &MatchContext<'_>,
    ) -> Option<DuplicateMatch> {
        self.strategies
            .iter()
            .find_map(|strategy| strategy.evaluate(event, fingerprint, ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        ProcessedEventState, RemotePlace, VenueRecord, DEFAULT_EVENT_DURATION_SECS,
    };
    use crate::services::fingerprint::fingerprint;
    use chrono::Utc;

    // 2025-08-20T19:00:00Z
    const START: i64 = 1755716400;

    fn venue(id: i64, name: &str) -> VenueRecord {
        VenueRecord {
            id,
            name: name.to_string(),
            address: String::new(),
            aliases: Vec::new(),
            markers: Vec::new(),
        }
    }

    fn canonical(title: &str, venue_name: &str, start_at: i64) -> CanonicalEvent {
        CanonicalEvent {
            title: title.to_string(),
            normalized_title: normalize_title(title),
            venue: venue(1, venue_name),
            start_at,
            end_at: start_at + DEFAULT_EVENT_DURATION_SECS,
            description: String::new(),
            tags: Vec::new(),
            source: "test".to_string(),
        }
    }

    fn remote(id: i64, title: &str, venue_name: &str, start: i64) -> RemoteEvent {
        RemoteEvent {
            id,
            title: title.to_string(),
            place: Some(RemotePlace {
                id: 1,
                name: venue_name.to_string(),
            }),
            start_datetime: start,
            end_datetime: None,
            description: Some("existing listing".to_string()),
        }
    }

    fn resolver() -> DuplicateResolver {
        DuplicateResolver::new(0.80, 0.75)
    }

    #[test]
    fn case_and_whitespace_variants_match_by_composite_key() {
        let index = ExistingEventIndex::build(vec![remote(
            1,
            "band a with band b",
            "will's pub",
            START + 3600,
        )]);
        let state = ProcessedEvents::default();
        let ctx = MatchContext {
            index: &index,
            state: &state,
        };

        let event = canonical("Band A With Band B", "Will's Pub", START);
        let fp = fingerprint(&event);
        let found = resolver().find_duplicate(&event, &fp, &ctx).unwrap();
        assert_eq!(found.reason, MatchReason::CompositeKey);
        assert_eq!(found.remote_id, Some(1));
    }

    #[test]
    fn exact_content_wins_over_everything() {
        let existing = RemoteEvent {
            description: Some(String::new()),
            ..remote(3, "Night Witch", "Conduit", START)
        };
        let index = ExistingEventIndex::build(vec![existing]);
        let state = ProcessedEvents::default();
        let ctx = MatchContext {
            index: &index,
            state: &state,
        };

        let event = canonical("Night Witch", "Conduit", START);
        let fp = fingerprint(&event);
        let found = resolver().find_duplicate(&event, &fp, &ctx).unwrap();
        assert_eq!(found.reason, MatchReason::ExactContent);
    }

    #[test]
    fn shared_key_candidates_are_disambiguated_by_similarity() {
        // Both remotes normalize to the same composite key as the candidate.
        let index = ExistingEventIndex::build(vec![
            remote(1, "Teenage Bottlerocket", "Will's Pub", START),
            remote(2, "teenage  bottlerocket", "Will's Pub", START + 3600),
        ]);
        let state = ProcessedEvents::default();
        let ctx = MatchContext {
            index: &index,
            state: &state,
        };

        let event = canonical("Teenage Bottlerocket", "Will's Pub", START + 7200);
        let fp = fingerprint(&event);
        let found = resolver().find_duplicate(&event, &fp, &ctx).unwrap();
        assert!(matches!(found.reason, MatchReason::SimilarTitle(_)));
    }

    #[test]
    fn early_show_suffix_is_flagged_via_cross_scan() {
        let index = ExistingEventIndex::build(vec![remote(
            4,
            "Teenage Bottlerocket",
            "Will's Pub",
            START,
        )]);
        let state = ProcessedEvents::default();
        let ctx = MatchContext {
            index: &index,
            state: &state,
        };

        // Different normalized title, so tiers 1 and 2 miss; venue+date scan
        // catches it.
        let event = canonical("Teenage Bottlerocket (Early Show)", "Will's Pub", START);
        let fp = fingerprint(&event);
        let found = resolver().find_duplicate(&event, &fp, &ctx).unwrap();
        match found.reason {
            MatchReason::CrossScan(score) => assert!(score >= 0.80),
            other => panic!("unexpected reason: {other}"),
        }
    }

    #[test]
    fn unrelated_show_same_night_is_not_a_duplicate() {
        let index = ExistingEventIndex::build(vec![remote(
            5,
            "Gel, Cold Brats",
            "Will's Pub",
            START,
        )]);
        let state = ProcessedEvents::default();
        let ctx = MatchContext {
            index: &index,
            state: &state,
        };

        let event = canonical("Midnight Ritual", "Will's Pub", START);
        let fp = fingerprint(&event);
        assert!(resolver().find_duplicate(&event, &fp, &ctx).is_none());
    }

    #[test]
    fn pending_event_hidden_from_index_matches_via_state() {
        let index = ExistingEventIndex::default();
        let event = canonical("Night Witch", "Conduit", START);
        let fp = fingerprint(&event);

        let mut state = ProcessedEvents::default();
        state.record(ProcessedEventState {
            event_hash: fp.content_hash.clone(),
            remote_id: Some(77),
            first_seen: Utc::now() - chrono::Duration::days(5),
            last_seen: Utc::now() - chrono::Duration::days(5),
            source: "willspub".to_string(),
            status: EventStatus::Pending,
        });
        let ctx = MatchContext {
            index: &index,
            state: &state,
        };

        let found = resolver().find_duplicate(&event, &fp, &ctx).unwrap();
        assert_eq!(
            found.reason,
            MatchReason::AlreadyProcessed(EventStatus::Pending)
        );
        assert_eq!(found.remote_id, Some(77));
    }

    #[test]
    fn similarity_has_equality_fast_path() {
        assert_eq!(title_similarity("same", "same"), 1.0);
        assert!(title_similarity("teenage bottlerocket", "gel cold brats") < 0.75);
    }
}
