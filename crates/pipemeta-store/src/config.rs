use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORE: &str = "_targets";

/// Location of a persisted pipeline store.
///
/// Passed explicitly to every reader; nothing in this crate falls back to a
/// process-wide default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    pub store: PathBuf,
}

impl StoreConfig {
    pub fn new(store: impl Into<PathBuf>) -> Self {
        Self {
            store: store.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.store
    }

    pub fn meta_dir(&self) -> PathBuf {
        self.store.join("meta")
    }

    /// Build records, one row per target.
    pub fn meta_path(&self) -> PathBuf {
        self.meta_dir().join("meta")
    }

    /// Execution outcomes, one row per target.
    pub fn progress_path(&self) -> PathBuf {
        self.meta_dir().join("progress")
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(DEFAULT_STORE)
    }
}
