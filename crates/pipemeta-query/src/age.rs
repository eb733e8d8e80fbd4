//! Time-threshold queries over the metadata store.

use crate::Result;
use chrono::{DateTime, Utc};
use pipemeta_core::{parse_inclusive, parse_threshold, resolve, NameSelector};
use pipemeta_store::StoreBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Older,
    Newer,
}

impl Side {
    fn admits(self, time: DateTime<Utc>, threshold: DateTime<Utc>, inclusive: bool) -> bool {
        match (self, inclusive) {
            (Side::Older, false) => time < threshold,
            (Side::Older, true) => time <= threshold,
            (Side::Newer, false) => time > threshold,
            (Side::Newer, true) => time >= threshold,
        }
    }
}

/// Targets whose last successful build is before `threshold` (or at it, when
/// `inclusive`).
///
/// Untimestamped targets never match. Names come back in store order. A
/// threshold in the future selects every timestamped eligible target, which
/// is how callers force a full rerun.
pub async fn find_older_than(
    store: &dyn StoreBackend,
    threshold: DateTime<Utc>,
    names: Option<&dyn NameSelector>,
    inclusive: bool,
) -> Result<Vec<String>> {
    filter_by_time(store, Side::Older, threshold, names, inclusive).await
}

/// Targets whose last successful build is after `threshold` (or at it, when
/// `inclusive`).
pub async fn find_newer_than(
    store: &dyn StoreBackend,
    threshold: DateTime<Utc>,
    names: Option<&dyn NameSelector>,
    inclusive: bool,
) -> Result<Vec<String>> {
    filter_by_time(store, Side::Newer, threshold, names, inclusive).await
}

async fn filter_by_time(
    store: &dyn StoreBackend,
    side: Side,
    threshold: DateTime<Utc>,
    names: Option<&dyn NameSelector>,
    inclusive: bool,
) -> Result<Vec<String>> {
    let snapshot = store.read_meta().await?;

    // Selectors see every name, including targets that were never built.
    let restriction = resolve(names, &snapshot.names());
    let eligible = restriction.eligible();

    let matched: Vec<String> = snapshot
        .rows
        .into_iter()
        .filter_map(|row| row.time.map(|time| (row.name, time)))
        .filter(|(name, _)| {
            eligible
                .as_ref()
                .map_or(true, |set| set.contains(name.as_str()))
        })
        .filter(|(_, time)| side.admits(*time, threshold, inclusive))
        .map(|(name, _)| name)
        .collect();

    tracing::info!(
        "{:?} than {} (inclusive: {}): {} targets",
        side,
        threshold,
        inclusive,
        matched.len()
    );

    Ok(matched)
}

/// Time-threshold query with validated inputs.
#[derive(Debug, Clone, Copy)]
pub struct AgeQuery<'a> {
    pub threshold: DateTime<Utc>,
    pub inclusive: bool,
    pub names: Option<&'a dyn NameSelector>,
}

impl<'a> AgeQuery<'a> {
    pub fn new(threshold: DateTime<Utc>) -> Self {
        Self {
            threshold,
            inclusive: false,
            names: None,
        }
    }

    /// Build a query from raw text arguments. Fails with `Validation` unless
    /// exactly one instant and at most one boolean were supplied. No store is
    /// touched.
    pub fn parse(threshold: &[&str], inclusive: &[&str]) -> Result<Self> {
        let threshold = parse_threshold(threshold)?;
        let inclusive = if inclusive.is_empty() {
            false
        } else {
            parse_inclusive(inclusive)?
        };
        Ok(Self::new(threshold).with_inclusive(inclusive))
    }

    pub fn with_inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    pub fn with_names(mut self, names: &'a dyn NameSelector) -> Self {
        self.names = Some(names);
        self
    }

    pub async fn older(&self, store: &dyn StoreBackend) -> Result<Vec<String>> {
        find_older_than(store, self.threshold, self.names, self.inclusive).await
    }

    pub async fn newer(&self, store: &dyn StoreBackend) -> Result<Vec<String>> {
        find_newer_than(store, self.threshold, self.names, self.inclusive).await
    }
}
