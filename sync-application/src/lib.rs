// Sync Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod state;

pub use error::SyncError;
pub use metrics::Metrics;
pub use state::AppState;
