//! Progress store reader: most recent execution outcome per target.

use crate::{
    snapshot::ProgressSnapshot,
    table::{keep_last, read_projection},
    Error, Result, StoreConfig,
};
use pipemeta_core::{ProgressRecord, ProgressStatus};

const COLUMNS: [&str; 2] = ["name", "progress"];

/// Load the condensed progress table.
///
/// Progress tracking starts lazily, so a missing store directory or progress
/// file reads as an empty table.
pub async fn read_progress(config: &StoreConfig) -> Result<ProgressSnapshot> {
    let path = config.progress_path();
    let Some(projection) = read_projection(&path, &COLUMNS).await? else {
        tracing::debug!("No progress file at {}", path.display());
        return Ok(ProgressSnapshot::default());
    };

    let mut rows = Vec::with_capacity(projection.rows.len());
    for row in projection.rows {
        let [name, progress]: [String; 2] = row.try_into().map_err(|_| Error::Malformed {
            path: path.clone(),
            reason: "unexpected projection width".to_string(),
        })?;
        let status = ProgressStatus::from_store(&progress);
        if !status.is_known() {
            tracing::warn!("Target {} has unrecognized progress {:?}", name, progress);
        }
        rows.push(ProgressRecord { name, status });
    }

    let rows = keep_last(rows, |r| r.name.as_str());
    tracing::debug!("Read {} progress rows from {}", rows.len(), path.display());

    Ok(ProgressSnapshot::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_read_condensed_progress() {
        let dir = tempfile::tempdir().unwrap();
        let meta_dir = dir.path().join("meta");
        tokio::fs::create_dir_all(&meta_dir).await.unwrap();
        tokio::fs::write(
            meta_dir.join("progress"),
            "name|type|parent|branches|progress\n\
             a|stem|||dispatched\n\
             b|stem|||errored\n\
             a|stem|||built\n\
             c_1|branch|c||canceled\n",
        )
        .await
        .unwrap();

        let snapshot = read_progress(&StoreConfig::new(dir.path())).await.unwrap();
        assert_eq!(
            snapshot.rows,
            vec![
                ProgressRecord::new("b", ProgressStatus::Errored),
                ProgressRecord::new("a", ProgressStatus::Built),
                ProgressRecord::new("c_1", ProgressStatus::Canceled),
            ]
        );
    }

    #[tokio::test]
    async fn test_absent_store_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("never_created"));

        let snapshot = read_progress(&config).await.unwrap();
        assert!(snapshot.is_empty());
    }
}
