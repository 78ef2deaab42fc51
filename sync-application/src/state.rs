use std::sync::Arc;

use sync_domain::entities::{RuntimeConfig, VenueRegistry};
use sync_domain::ports::{AdminInterface, CalendarApi, EventSource, StateRepository};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub calendar: Arc<dyn CalendarApi>,
    pub state_repo: Arc<dyn StateRepository>,
    pub admin: Arc<dyn AdminInterface>,
    pub sources: Vec<Arc<dyn EventSource>>,
    pub venues: Arc<VenueRegistry>,
    pub metrics: Arc<Metrics>,
}
