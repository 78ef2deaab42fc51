// File-backed event source
// Scrapers hand their output over as JSON files; this adapter feeds them
// into the engine as if they were live sources

use async_trait::async_trait;
use tokio::fs;

use sync_domain::entities::RawEvent;
use sync_domain::ports::EventSource;

pub struct FileEventSource {
    name: String,
    path: String,
}

impl FileEventSource {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl EventSource for FileEventSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_events(&self) -> anyhow::Result<Vec<RawEvent>> {
        let content = fs::read_to_string(&self.path).await?;
        let mut events: Vec<RawEvent> = serde_json::from_str(&content)?;
        // Scrapers rarely stamp their own name into every record.
        for event in &mut events {
            if event.source.is_empty() {
                event.source = self.name.clone();
            }
        }
        Ok(events)
    }
}
