pub mod context;
pub mod lifecycle;

pub use lifecycle::{run_cleanup_once, run_sync_once};
