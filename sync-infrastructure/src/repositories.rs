pub mod state_file;
pub mod venue_files;

pub use state_file::*;
pub use venue_files::*;
