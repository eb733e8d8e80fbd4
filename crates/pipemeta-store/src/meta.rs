//! Metadata store reader: last successful build time per target.

use crate::{
    snapshot::MetaSnapshot,
    table::{keep_last, read_projection},
    Error, Result, StoreConfig,
};
use pipemeta_core::{time::parse_stored_time, TargetRecord};

const COLUMNS: [&str; 2] = ["name", "time"];

/// Load the condensed metadata table.
///
/// The store directory must exist. A store that has not written its metadata
/// file yet reads as an empty table.
pub async fn read_meta(config: &StoreConfig) -> Result<MetaSnapshot> {
    let root = config.root();
    let is_dir = tokio::fs::metadata(root)
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(Error::StoreNotFound(root.to_path_buf()));
    }

    let path = config.meta_path();
    let Some(projection) = read_projection(&path, &COLUMNS).await? else {
        tracing::debug!("No metadata file at {}", path.display());
        return Ok(MetaSnapshot::default());
    };

    let mut rows = Vec::with_capacity(projection.rows.len());
    for row in projection.rows {
        let [name, time]: [String; 2] = row.try_into().map_err(|_| Error::Malformed {
            path: path.clone(),
            reason: "unexpected projection width".to_string(),
        })?;
        let time = parse_stored_time(&time).map_err(|e| Error::Malformed {
            path: path.clone(),
            reason: format!("target {}: {}", name, e),
        })?;
        rows.push(TargetRecord { name, time });
    }

    let rows = keep_last(rows, |r| r.name.as_str());
    tracing::debug!("Read {} metadata rows from {}", rows.len(), path.display());

    Ok(MetaSnapshot::new(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    async fn store_with_meta(contents: &str) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let meta_dir = dir.path().join("meta");
        tokio::fs::create_dir_all(&meta_dir).await.unwrap();
        tokio::fs::write(meta_dir.join("meta"), contents).await.unwrap();
        dir
    }

    #[tokio::test]
    async fn test_read_condensed_meta() {
        let dir = store_with_meta(
            "name|type|data|time|size\n\
             x|stem|abc|t1s|10\n\
             y|stem|def|t2s|20\n\
             z|stem|ghi||0\n",
        )
        .await;

        let snapshot = read_meta(&StoreConfig::new(dir.path())).await.unwrap();
        assert_eq!(
            snapshot.rows,
            vec![
                TargetRecord::new("x", Some(Utc.with_ymd_and_hms(1970, 1, 2, 0, 0, 0).unwrap())),
                TargetRecord::new("y", Some(Utc.with_ymd_and_hms(1970, 1, 3, 0, 0, 0).unwrap())),
                TargetRecord::new("z", None),
            ]
        );
    }

    #[tokio::test]
    async fn test_rebuilt_target_takes_last_row() {
        let dir = store_with_meta("name|time\nx|t1s\ny|t2s\nx|t3s\n").await;

        let snapshot = read_meta(&StoreConfig::new(dir.path())).await.unwrap();
        assert_eq!(snapshot.names(), vec!["y", "x"]);
        assert_eq!(
            snapshot.rows[1].time,
            Some(Utc.with_ymd_and_hms(1970, 1, 4, 0, 0, 0).unwrap())
        );
    }

    #[tokio::test]
    async fn test_missing_store_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::new(dir.path().join("_targets"));

        let err = read_meta(&config).await.unwrap_err();
        assert!(matches!(err, Error::StoreNotFound(_)));
    }

    #[tokio::test]
    async fn test_store_without_meta_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = read_meta(&StoreConfig::new(dir.path())).await.unwrap();
        assert!(snapshot.is_empty());
    }

    #[tokio::test]
    async fn test_bad_time_fails_whole_read() {
        let dir = store_with_meta("name|time\nx|t1s\ny|whenever\n").await;

        let err = read_meta(&StoreConfig::new(dir.path())).await.unwrap_err();
        assert!(matches!(err, Error::Malformed { .. }));
    }
}
