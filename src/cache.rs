pub mod bins;
pub mod registry;
pub mod tuning;

// Re-export commonly used types
pub use bins::{Backend, CacheBin};
pub use registry::{BackendRegistry, RegistryError};
pub use tuning::TuningParameters;
