// Venue registry loader
// The venue table is curated by hand in YAML alongside the config file

use async_trait::async_trait;
use tokio::fs;

use sync_domain::entities::VenueRegistry;
use sync_domain::ports::VenueRepository;

pub struct VenueFileRepository;

impl VenueFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for VenueFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VenueRepository for VenueFileRepository {
    async fn load_registry(&self, path: &str) -> anyhow::Result<VenueRegistry> {
        let content = fs::read_to_string(path).await?;
        let registry: VenueRegistry = serde_yaml::from_str(&content)?;
        if registry.is_empty() {
            anyhow::bail!("venue registry {} contains no venues", path);
        }
        if registry.by_id(registry.default_venue_id).is_none() {
            anyhow::bail!(
                "venue registry {} default_venue_id {} has no record",
                path,
                registry.default_venue_id
            );
        }
        Ok(registry)
    }
}
