pub mod loader;
pub mod types;

pub use loader::{ConfigLoader, LoadedConfiguration};
pub use types::{Limits, MalformedRows, RegistrarConfig, DEFAULT_CAPACITY, DEFAULT_UNIT_CEILING};
