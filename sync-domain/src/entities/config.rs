// Runtime configuration handed to the engine by bootstrap

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub calendar_base_url: String,
    pub min_sync_interval_hours: u64,
    /// Tier-2 strictness: similarity required when several indexed events
    /// share a composite key.
    pub fuzzy_match_threshold_same_key: f64,
    /// Tier-3 strictness: similarity required for the cross-index scan over
    /// same venue and date.
    pub fuzzy_match_threshold_cross_scan: f64,
    pub state_retention_days: u32,
    pub dry_run: bool,
    pub request_timeout_seconds: u64,
    pub state_path: String,
    pub venues_path: String,
    pub last_run_path: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}
