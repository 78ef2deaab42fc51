// Venue resolution
// Every event leaves here with a concrete venue record; the fallback chain
// guarantees it so long as the registry's default id exists

use thiserror::Error;
use tracing::{debug, error};

use crate::entities::{RawEvent, VenueRecord, VenueRegistry};
use crate::services::normalizer::normalize_venue;

#[derive(Debug, Error)]
pub enum VenueResolutionError {
    /// Reachable only through a registry whose default id points at no
    /// venue, which is a configuration defect rather than a runtime
    /// condition.
    #[error("default venue id {0} is not in the registry")]
    MissingDefault(i64),
}

pub struct VenueResolver<'a> {
    registry: &'a VenueRegistry,
}

impl<'a> VenueResolver<'a> {
    pub fn new(registry: &'a VenueRegistry) -> Self {
        Self { registry }
    }

    /// Map a venue hint (or its absence) to a venue record. Resolution
    /// order: exact normalized name/alias match, marker scan over the
    /// event's free text, configured default.
    pub fn resolve(&self, event: &RawEvent) -> Result<&'a VenueRecord, VenueResolutionError> {
        if let Some(hint) = event.venue.as_deref() {
            if let Some(venue) = self.match_name(hint) {
                return Ok(venue);
            }
        }

        if let Some(venue) = self.match_markers(event) {
            debug!(
                venue = %venue.name,
                title = %event.title,
                "venue detected from event content"
            );
            return Ok(venue);
        }

        match self.registry.by_id(self.registry.default_venue_id) {
            Some(venue) => Ok(venue),
            None => {
                error!(
                    default_venue_id = self.registry.default_venue_id,
                    "venue registry has no record for its default id"
                );
                Err(VenueResolutionError::MissingDefault(
                    self.registry.default_venue_id,
                ))
            }
        }
    }

    fn match_name(&self, hint: &str) -> Option<&'a VenueRecord> {
        let normalized = normalize_venue(hint);
        if normalized.is_empty() {
            return None;
        }
        self.registry.venues.iter().find(|venue| {
            normalize_venue(&venue.name) == normalized
                || venue
                    .aliases
                    .iter()
                    .any(|alias| normalize_venue(alias) == normalized)
        })
    }

    fn match_markers(&self, event: &RawEvent) -> Option<&'a VenueRecord> {
        let haystack = [
            event.title.as_str(),
            event.description.as_deref().unwrap_or(""),
            event.location.as_deref().unwrap_or(""),
            event.venue.as_deref().unwrap_or(""),
        ]
        .join(" ")
        .to_lowercase();

        self.registry.venues.iter().find(|venue| {
            venue
                .markers
                .iter()
                .any(|marker| !marker.is_empty() && haystack.contains(&marker.to_lowercase()))
        })
    }
}
