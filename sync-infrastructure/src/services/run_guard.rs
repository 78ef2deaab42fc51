// Minimum-interval run guard
// A last-run timestamp file, checked before any network work; overlapping
// schedulers are prevented by interval, not by locking

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{info, warn};

pub struct RunGuard {
    path: PathBuf,
}

impl RunGuard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Whether enough time has passed since the last successful run. An
    /// unreadable stamp is treated as "proceed" so a corrupt file cannot
    /// wedge the scheduler.
    pub async fn should_run(&self, min_interval_hours: u64) -> bool {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => {
                info!("no previous sync record found");
                return true;
            }
        };
        let last_run = match content.trim().parse::<DateTime<Utc>>() {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(error = %err, "unreadable last-run stamp, proceeding anyway");
                return true;
            }
        };
        let elapsed_hours = (Utc::now() - last_run).num_minutes() as f64 / 60.0;
        if elapsed_hours < min_interval_hours as f64 {
            info!(
                elapsed_hours = format!("{elapsed_hours:.1}"),
                min_interval_hours, "within minimum sync interval, skipping run"
            );
            false
        } else {
            true
        }
    }

    pub async fn mark_run(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(&self.path, Utc::now().to_rfc3339()).await?;
        Ok(())
    }
}
