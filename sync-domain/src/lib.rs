// Sync Domain Layer

pub mod entities;
pub mod ports;
pub mod services;
pub mod utils;

pub use entities::*;
pub use ports::*;
pub use services::*;
pub use utils::*;
