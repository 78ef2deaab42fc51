// Domain services (pure logic)
pub mod fingerprint;
pub mod index;
pub mod matcher;
pub mod normalizer;
pub mod venue_resolver;

pub use fingerprint::*;
pub use index::*;
pub use matcher::*;
pub use normalizer::*;
pub use venue_resolver::*;
