//! Status queries over the progress store.

use crate::Result;
use pipemeta_core::{resolve, NameSelector, ProgressRecord, ProgressStatus, Restriction};
use pipemeta_store::StoreBackend;

/// Targets whose most recent execution ended in `status`.
///
/// Without a selector the result follows store order. With one, rows are
/// looked up one by one in the order the selector produced, and selected
/// names the progress store has never seen are skipped. This differs from
/// the age queries, which filter by membership and always keep store order.
pub async fn find_with_status(
    store: &dyn StoreBackend,
    status: &ProgressStatus,
    names: Option<&dyn NameSelector>,
) -> Result<Vec<String>> {
    let snapshot = store.read_progress().await?;
    let restriction = resolve(names, &snapshot.names());

    let rows: Vec<&ProgressRecord> = match &restriction {
        Restriction::Unrestricted => snapshot.rows.iter().collect(),
        Restriction::Explicit(selected) => {
            let index = snapshot.index();
            selected
                .iter()
                .filter_map(|name| index.get(name.as_str()).map(|&i| &snapshot.rows[i]))
                .collect()
        }
    };

    let matched: Vec<String> = rows
        .into_iter()
        .filter(|row| &row.status == status)
        .map(|row| row.name.clone())
        .collect();

    tracing::info!("Targets with status {}: {}", status, matched.len());

    Ok(matched)
}

/// Targets whose most recent execution errored.
pub async fn find_errored(
    store: &dyn StoreBackend,
    names: Option<&dyn NameSelector>,
) -> Result<Vec<String>> {
    find_with_status(store, &ProgressStatus::Errored, names).await
}

pub async fn find_canceled(
    store: &dyn StoreBackend,
    names: Option<&dyn NameSelector>,
) -> Result<Vec<String>> {
    find_with_status(store, &ProgressStatus::Canceled, names).await
}

pub async fn find_skipped(
    store: &dyn StoreBackend,
    names: Option<&dyn NameSelector>,
) -> Result<Vec<String>> {
    find_with_status(store, &ProgressStatus::Skipped, names).await
}

pub async fn find_built(
    store: &dyn StoreBackend,
    names: Option<&dyn NameSelector>,
) -> Result<Vec<String>> {
    find_with_status(store, &ProgressStatus::Built, names).await
}
