// File-backed processed-event store
// JSON on disk so the store is inspectable and can be re-backed by a
// database behind the same repository trait

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use sync_domain::entities::ProcessedEvents;
use sync_domain::ports::StateRepository;

pub struct FileStateRepository {
    path: PathBuf,
}

impl FileStateRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StateRepository for FileStateRepository {
    async fn load(&self) -> anyhow::Result<ProcessedEvents> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no state file yet, starting fresh");
            return Ok(ProcessedEvents::default());
        }
        let content = fs::read_to_string(&self.path).await?;
        let state: ProcessedEvents = serde_json::from_str(&content)?;
        info!(entries = state.len(), "loaded processed-event state");
        Ok(state)
    }

    async fn save(&self, state: &ProcessedEvents) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let content = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, content).await?;
        info!(entries = state.len(), "saved processed-event state");
        Ok(())
    }
}
