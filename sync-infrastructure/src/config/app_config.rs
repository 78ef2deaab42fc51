use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use sync_domain::entities::RuntimeConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct SourceFileConfig {
    pub name: String,
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub calendar_base_url: String,
    pub min_sync_interval_hours: u64,
    pub fuzzy_match_threshold_same_key: f64,
    pub fuzzy_match_threshold_cross_scan: f64,
    pub state_retention_days: u32,
    pub dry_run: bool,
    pub request_timeout_seconds: u64,
    pub state_path: String,
    pub venues_path: String,
    pub last_run_path: String,
    pub sources: Vec<SourceFileConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            calendar_base_url: "http://localhost:13120".to_string(),
            min_sync_interval_hours: 12,
            fuzzy_match_threshold_same_key: 0.80,
            fuzzy_match_threshold_cross_scan: 0.75,
            state_retention_days: 30,
            dry_run: false,
            request_timeout_seconds: 15,
            state_path: "./event_state.json".to_string(),
            venues_path: "./venues.yaml".to_string(),
            last_run_path: "./last_sync".to_string(),
            sources: Vec::new(),
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("SYNC_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        if !file_path.exists() {
            warn!(path = %path, "config file not found, using defaults");
            let mut config = AppConfig::default();
            config.apply_env_overrides();
            config.resolve_paths(base_dir);
            config.validate()?;
            return Ok(config);
        }
        let content = fs::read_to_string(file_path).await?;
        let mut config: AppConfig = toml::from_str(&content)?;
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.state_path = resolve_path(base, &self.state_path);
        self.venues_path = resolve_path(base, &self.venues_path);
        self.last_run_path = resolve_path(base, &self.last_run_path);
        for source in &mut self.sources {
            source.path = resolve_path(base, &source.path);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.calendar_base_url.trim().is_empty() {
            return Err(anyhow!("calendar_base_url must not be empty"));
        }
        if !self.calendar_base_url.starts_with("http://")
            && !self.calendar_base_url.starts_with("https://")
        {
            return Err(anyhow!(
                "calendar_base_url must be an http(s) url: {}",
                self.calendar_base_url
            ));
        }
        for (name, value) in [
            (
                "fuzzy_match_threshold_same_key",
                self.fuzzy_match_threshold_same_key,
            ),
            (
                "fuzzy_match_threshold_cross_scan",
                self.fuzzy_match_threshold_cross_scan,
            ),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("{} must be between 0.0 and 1.0", name));
            }
        }
        if self.state_retention_days == 0 {
            return Err(anyhow!("state_retention_days must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            calendar_base_url: self.calendar_base_url.trim_end_matches('/').to_string(),
            min_sync_interval_hours: self.min_sync_interval_hours,
            fuzzy_match_threshold_same_key: self.fuzzy_match_threshold_same_key,
            fuzzy_match_threshold_cross_scan: self.fuzzy_match_threshold_cross_scan,
            state_retention_days: self.state_retention_days,
            dry_run: self.dry_run,
            request_timeout_seconds: self.request_timeout_seconds,
            state_path: self.state_path.clone(),
            venues_path: self.venues_path.clone(),
            last_run_path: self.last_run_path.clone(),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("CALENDAR_BASE_URL") {
            self.calendar_base_url = value;
        }
        if let Ok(value) = env::var("MIN_SYNC_INTERVAL_HOURS") {
            self.min_sync_interval_hours = value.parse().unwrap_or(self.min_sync_interval_hours);
        }
        if let Ok(value) = env::var("FUZZY_MATCH_THRESHOLD_SAME_KEY") {
            self.fuzzy_match_threshold_same_key =
                value.parse().unwrap_or(self.fuzzy_match_threshold_same_key);
        }
        if let Ok(value) = env::var("FUZZY_MATCH_THRESHOLD_CROSS_SCAN") {
            self.fuzzy_match_threshold_cross_scan =
                value.parse().unwrap_or(self.fuzzy_match_threshold_cross_scan);
        }
        if let Ok(value) = env::var("STATE_RETENTION_DAYS") {
            self.state_retention_days = value.parse().unwrap_or(self.state_retention_days);
        }
        if let Ok(value) = env::var("DRY_RUN") {
            self.dry_run = matches!(value.as_str(), "1" | "true" | "TRUE" | "True");
        }
        if let Ok(value) = env::var("SYNC_STATE_PATH") {
            self.state_path = value;
        }
        if let Ok(value) = env::var("SYNC_VENUES_PATH") {
            self.venues_path = value;
        }
        if let Ok(value) = env::var("SYNC_LAST_RUN_PATH") {
            self.last_run_path = value;
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        AppConfig::default().validate().unwrap();
    }

    #[test]
    fn thresholds_are_range_checked() {
        let mut config = AppConfig::default();
        config.fuzzy_match_threshold_same_key = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn base_url_must_be_http() {
        let mut config = AppConfig::default();
        config.calendar_base_url = "ftp://calendar".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn runtime_config_strips_trailing_slash() {
        let mut config = AppConfig::default();
        config.calendar_base_url = "https://orlandopunx.com/".to_string();
        assert_eq!(
            config.to_runtime_config().calendar_base_url,
            "https://orlandopunx.com"
        );
    }

    #[test]
    fn env_overrides_take_precedence() {
        env::set_var("MIN_SYNC_INTERVAL_HOURS", "6");
        env::set_var("DRY_RUN", "true");
        let mut config = AppConfig::default();
        config.apply_env_overrides();
        env::remove_var("MIN_SYNC_INTERVAL_HOURS");
        env::remove_var("DRY_RUN");
        assert_eq!(config.min_sync_interval_hours, 6);
        assert!(config.dry_run);
    }

    #[test]
    fn toml_round_trip() {
        let config: AppConfig = toml::from_str(
            r#"
            calendar_base_url = "https://orlandopunx.com"
            dry_run = true

            [[sources]]
            name = "willspub"
            path = "./scraped/willspub.json"
            "#,
        )
        .unwrap();
        assert!(config.dry_run);
        assert_eq!(config.sources.len(), 1);
        assert_eq!(config.sources[0].name, "willspub");
    }
}
