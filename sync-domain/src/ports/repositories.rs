use async_trait::async_trait;

use crate::entities::{ProcessedEvents, VenueRegistry};

/// Durable cross-run store of processed fingerprints. The default
/// implementation is a JSON file; a database can stand in without the
/// duplicate resolver or orchestrator noticing.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn load(&self) -> anyhow::Result<ProcessedEvents>;
    async fn save(&self, state: &ProcessedEvents) -> anyhow::Result<()>;
}

#[async_trait]
pub trait VenueRepository: Send + Sync {
    async fn load_registry(&self, path: &str) -> anyhow::Result<VenueRegistry>;
}
