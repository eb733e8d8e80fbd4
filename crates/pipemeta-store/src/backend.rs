use crate::{
    meta::read_meta, progress::read_progress, Error, MetaSnapshot, ProgressSnapshot, Result,
    StoreConfig,
};
use async_trait::async_trait;
use pipemeta_core::{ProgressRecord, TargetRecord};
use std::path::PathBuf;

/// Source of condensed store snapshots.
///
/// Every call is an independent read; implementations must not cache between
/// calls.
#[async_trait]
pub trait StoreBackend: Send + Sync {
    /// Condensed build records. Fails with `StoreNotFound` when the store is
    /// absent.
    async fn read_meta(&self) -> Result<MetaSnapshot>;

    /// Condensed progress records. An absent store is an empty table.
    async fn read_progress(&self) -> Result<ProgressSnapshot>;
}

/// Store persisted on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileStore {
    config: StoreConfig,
}

impl FileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }
}

#[async_trait]
impl StoreBackend for FileStore {
    async fn read_meta(&self) -> Result<MetaSnapshot> {
        read_meta(&self.config).await
    }

    async fn read_progress(&self) -> Result<ProgressSnapshot> {
        read_progress(&self.config).await
    }
}

/// In-memory store, mostly for embedding and tests.
///
/// `meta: None` behaves like a store directory that does not exist.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub meta: Option<Vec<TargetRecord>>,
    pub progress: Vec<ProgressRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            meta: Some(Vec::new()),
            progress: Vec::new(),
        }
    }

    pub fn with_meta(mut self, rows: Vec<TargetRecord>) -> Self {
        self.meta = Some(rows);
        self
    }

    pub fn with_progress(mut self, rows: Vec<ProgressRecord>) -> Self {
        self.progress = rows;
        self
    }
}

#[async_trait]
impl StoreBackend for MemoryStore {
    async fn read_meta(&self) -> Result<MetaSnapshot> {
        match &self.meta {
            Some(rows) => Ok(MetaSnapshot::new(rows.clone())),
            None => Err(Error::StoreNotFound(PathBuf::from("<memory>"))),
        }
    }

    async fn read_progress(&self) -> Result<ProgressSnapshot> {
        Ok(ProgressSnapshot::new(self.progress.clone()))
    }
}
