pub mod admin_api;
pub mod calendar_client;
pub mod credentials;
pub mod event_files;
pub mod run_guard;

pub use admin_api::*;
pub use calendar_client::*;
pub use credentials::*;
pub use event_files::*;
pub use run_guard::*;
