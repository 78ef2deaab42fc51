// Venue reference data
// Fixed, externally curated; looked up, never created here

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    /// Alternative spellings matched exactly after normalization.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// Lowercase substrings scanned for in free text (nicknames, distinctive
    /// address fragments).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<String>,
}

/// The curated venue table plus the fallback assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueRegistry {
    pub venues: Vec<VenueRecord>,
    pub default_venue_id: i64,
}

impl VenueRegistry {
    pub fn by_id(&self, id: i64) -> Option<&VenueRecord> {
        self.venues.iter().find(|venue| venue.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.venues.is_empty()
    }
}
