use pipemeta_core::{ProgressRecord, TargetRecord};
use std::collections::HashMap;

/// Condensed metadata table as read at one point in time. Rows keep store
/// order and names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetaSnapshot {
    pub rows: Vec<TargetRecord>,
}

impl MetaSnapshot {
    pub fn new(rows: Vec<TargetRecord>) -> Self {
        Self { rows }
    }

    /// Every name in the snapshot, timestamped or not.
    pub fn names(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Condensed progress table as read at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub rows: Vec<ProgressRecord>,
}

impl ProgressSnapshot {
    pub fn new(rows: Vec<ProgressRecord>) -> Self {
        Self { rows }
    }

    pub fn names(&self) -> Vec<String> {
        self.rows.iter().map(|r| r.name.clone()).collect()
    }

    /// Position of each name in the snapshot.
    pub fn index(&self) -> HashMap<&str, usize> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, r)| (r.name.as_str(), i))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
