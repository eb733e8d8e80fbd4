pub mod backend;
pub mod config;
pub mod meta;
pub mod progress;
pub mod snapshot;
mod table;
pub mod error;

// Re-exports
pub use backend::{FileStore, MemoryStore, StoreBackend};
pub use config::StoreConfig;
pub use snapshot::{MetaSnapshot, ProgressSnapshot};
pub use error::{Error, Result};
