// Event entities
// Raw scraped listings, their canonical form, and the calendar's own records

use serde::{Deserialize, Serialize};

use crate::entities::VenueRecord;

/// One listing as a scraper collaborator produced it. Title and date are the
/// only fields a source must fill in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub title: String,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`, optional
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A RawEvent after normalization and venue resolution, ready for
/// fingerprinting and submission. `venue.id` is guaranteed non-zero by the
/// venue resolver.
#[derive(Debug, Clone)]
pub struct CanonicalEvent {
    /// Display title, submitted as-is.
    pub title: String,
    /// Normalized title, used for all comparisons.
    pub normalized_title: String,
    pub venue: VenueRecord,
    pub start_at: i64,
    pub end_at: i64,
    pub description: String,
    pub tags: Vec<String>,
    pub source: String,
}

/// Event as the calendar API returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteEvent {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub place: Option<RemotePlace>,
    pub start_datetime: i64,
    #[serde(default)]
    pub end_datetime: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemotePlace {
    pub id: i64,
    pub name: String,
}

/// Payload for `create_event`.
#[derive(Debug, Clone, Serialize)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub start_datetime: i64,
    pub end_datetime: i64,
    pub place_id: i64,
    pub tags: Vec<String>,
}

/// Events run 3 hours when the source does not say otherwise.
pub const DEFAULT_EVENT_DURATION_SECS: i64 = 3 * 3600;

impl CanonicalEvent {
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            start_datetime: self.start_at,
            end_datetime: self.end_at,
            place_id: self.venue.id,
            tags: self.tags.clone(),
        }
    }
}
