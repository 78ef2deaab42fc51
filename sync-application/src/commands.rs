// Application commands
pub mod cleanup_commands;
pub mod sync_commands;

pub use cleanup_commands::*;
pub use sync_commands::*;
