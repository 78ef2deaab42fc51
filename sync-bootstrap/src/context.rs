use std::sync::Arc;

use anyhow::{Context, Result};

use sync_application::{AppState, Metrics};
use sync_domain::ports::{CalendarApi, EventSource, VenueRepository};
use sync_infrastructure::{
    ApiAdminInterface, AppConfig, EnvCredentialsProvider, FileEventSource, FileStateRepository,
    GancioClient, VenueFileRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let runtime_config = config.to_runtime_config();

        let venues = VenueFileRepository::new()
            .load_registry(&runtime_config.venues_path)
            .await
            .with_context(|| format!("loading venue registry {}", runtime_config.venues_path))?;

        let calendar: Arc<dyn CalendarApi> = Arc::new(GancioClient::new(
            &runtime_config.calendar_base_url,
            runtime_config.request_timeout_seconds,
            Arc::new(EnvCredentialsProvider::new()),
        )?);

        let sources: Vec<Arc<dyn EventSource>> = config
            .sources
            .iter()
            .map(|source| {
                Arc::new(FileEventSource::new(source.name.as_str(), source.path.as_str()))
                    as Arc<dyn EventSource>
            })
            .collect();

        let state = AppState {
            state_repo: Arc::new(FileStateRepository::new(&runtime_config.state_path)),
            admin: Arc::new(ApiAdminInterface::new(calendar.clone())),
            calendar,
            sources,
            venues: Arc::new(venues),
            metrics: Arc::new(Metrics::default()),
            config: runtime_config,
        };

        Ok(Self { state })
    }
}
