// Submission orchestrator
// Scraped -> VenueResolved -> Fingerprinted -> {Duplicate | New} ->
// {Created | SubmissionFailed}, with the index and the persistent state
// updated as the batch proceeds so later candidates see earlier decisions

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use sync_domain::entities::{
    CanonicalEvent, EventStatus, ProcessedEventState, RawEvent, DEFAULT_EVENT_DURATION_SECS,
};
use sync_domain::services::{
    fingerprint, DuplicateResolver, ExistingEventIndex, MatchContext, VenueResolver,
};
use sync_domain::utils::parse_start_time;
use sync_domain::{normalize_title, ProcessedEvents};

use crate::error::SyncError;
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum EventOutcome {
    Created { remote_id: i64 },
    WouldCreate { venue: String },
    Skipped { reason: String },
    Failed { error: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct EventDecision {
    pub title: String,
    pub source: String,
    #[serde(flatten)]
    pub outcome: EventOutcome,
}

#[derive(Debug, Default, Serialize)]
pub struct SyncSummary {
    pub processed: usize,
    pub created: usize,
    pub skipped: usize,
    pub failed: usize,
    pub dry_run: bool,
    pub details: Vec<EventDecision>,
}

/// Gather candidates from every configured source and reconcile them against
/// the calendar. A source that yields nothing is "no work", not an error.
pub async fn run_sync(state: &AppState) -> Result<SyncSummary, SyncError> {
    let mut raw_events = Vec::new();
    for source in &state.sources {
        match source.fetch_events().await {
            Ok(events) => {
                info!(source = source.name(), count = events.len(), "source fetched");
                raw_events.extend(events);
            }
            Err(err) => {
                warn!(source = source.name(), error = %err, "source unavailable, skipping");
            }
        }
    }
    sync_batch(state, raw_events).await
}

pub async fn sync_batch(
    state: &AppState,
    raw_events: Vec<RawEvent>,
) -> Result<SyncSummary, SyncError> {
    state
        .calendar
        .authenticate()
        .await
        .map_err(|err| SyncError::AuthenticationFailed(err.to_string()))?;

    // A failed listing degrades to an empty index; the persistent store is
    // then the only defense against resubmission.
    let mut index = match state.calendar.list_events().await {
        Ok(events) => {
            info!(count = events.len(), "indexed remote events");
            ExistingEventIndex::build(events)
        }
        Err(err) => {
            warn!(error = %err, "failed to list remote events, running with empty index");
            ExistingEventIndex::default()
        }
    };

    let mut processed = match state.state_repo.load().await {
        Ok(loaded) => loaded,
        Err(err) => {
            warn!(error = %err, "failed to load processed-event state, starting fresh");
            ProcessedEvents::default()
        }
    };
    let now = Utc::now();
    let pruned = processed.prune(state.config.state_retention_days, now);
    if pruned > 0 {
        info!(pruned, "expired processed-event entries dropped");
    }

    let resolver = DuplicateResolver::new(
        state.config.fuzzy_match_threshold_same_key,
        state.config.fuzzy_match_threshold_cross_scan,
    );
    let venue_resolver = VenueResolver::new(&state.venues);
    let dry_run = state.config.dry_run;

    let mut summary = SyncSummary {
        dry_run,
        ..SyncSummary::default()
    };

    for raw in raw_events {
        summary.processed += 1;
        let title = raw.title.clone();
        let source = raw.source.clone();

        let event = match canonicalize(&raw, &venue_resolver) {
            Ok(event) => event,
            Err(err) => {
                warn!(title = %title, error = %err, "candidate could not be canonicalized");
                summary.failed += 1;
                state.metrics.record_failed();
                summary.details.push(EventDecision {
                    title,
                    source,
                    outcome: EventOutcome::Failed {
                        error: err.to_string(),
                    },
                });
                continue;
            }
        };

        let fp = fingerprint(&event);
        let ctx = MatchContext {
            index: &index,
            state: &processed,
        };
        if let Some(found) = resolver.find_duplicate(&event, &fp, &ctx) {
            info!(title = %title, reason = %found.reason, "duplicate, skipping");
            summary.skipped += 1;
            state.metrics.record_skipped();
            if !dry_run {
                processed.touch(&fp.content_hash, now);
                // A match against the live listing means the event cleared
                // moderation; promote a pending record accordingly.
                if found.remote.is_some() {
                    processed.update_status(&fp.content_hash, EventStatus::Approved, found.remote_id);
                }
            }
            summary.details.push(EventDecision {
                title,
                source,
                outcome: EventOutcome::Skipped {
                    reason: found.reason.to_string(),
                },
            });
            continue;
        }

        if dry_run {
            info!(title = %title, venue = %event.venue.name, "dry run, would create");
            summary.created += 1;
            summary.details.push(EventDecision {
                title,
                source,
                outcome: EventOutcome::WouldCreate {
                    venue: event.venue.name.clone(),
                },
            });
            continue;
        }

        match state.calendar.create_event(&event.to_draft()).await {
            Ok(remote) => {
                info!(title = %title, remote_id = remote.id, venue = %event.venue.name, "event created");
                summary.created += 1;
                state.metrics.record_created();
                processed.record(ProcessedEventState {
                    event_hash: fp.content_hash.clone(),
                    remote_id: Some(remote.id),
                    first_seen: now,
                    last_seen: now,
                    source: source.clone(),
                    status: EventStatus::Pending,
                });
                // Later candidates in this batch must see this event.
                index.insert(remote.clone());
                summary.details.push(EventDecision {
                    title,
                    source,
                    outcome: EventOutcome::Created {
                        remote_id: remote.id,
                    },
                });
            }
            Err(err) => {
                // Not recorded, so the event is retried on the next run.
                warn!(title = %title, error = %err, "event creation failed");
                summary.failed += 1;
                state.metrics.record_failed();
                summary.details.push(EventDecision {
                    title,
                    source,
                    outcome: EventOutcome::Failed {
                        error: err.to_string(),
                    },
                });
            }
        }
    }

    state.metrics.record_processed(summary.processed);

    if !dry_run {
        if let Err(err) = state.state_repo.save(&processed).await {
            warn!(error = %err, "failed to persist processed-event state");
        }
    }

    info!(
        processed = summary.processed,
        created = summary.created,
        skipped = summary.skipped,
        failed = summary.failed,
        dry_run,
        "sync batch complete"
    );
    Ok(summary)
}

fn canonicalize(
    raw: &RawEvent,
    venue_resolver: &VenueResolver<'_>,
) -> anyhow::Result<CanonicalEvent> {
    let venue = venue_resolver.resolve(raw)?.clone();
    let start_at = parse_start_time(&raw.date, raw.time.as_deref())
        .with_context(|| format!("event {:?}", raw.title))?;
    Ok(CanonicalEvent {
        title: raw.title.trim().to_string(),
        normalized_title: normalize_title(&raw.title),
        venue,
        start_at,
        end_at: start_at + DEFAULT_EVENT_DURATION_SECS,
        description: raw.description.clone().unwrap_or_default(),
        tags: raw.tags.clone(),
        source: raw.source.clone(),
    })
}
