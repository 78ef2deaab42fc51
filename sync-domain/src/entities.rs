// Domain entities
pub mod config;
pub mod event;
pub mod state;
pub mod venue;

pub use config::*;
pub use event::*;
pub use state::*;
pub use venue::*;
