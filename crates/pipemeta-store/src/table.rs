//! Pipe-delimited table reader shared by the metadata and progress stores.

use crate::{Error, Result};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;

/// Rows projected onto the requested columns, in file order.
pub(crate) struct Projection {
    pub rows: Vec<Vec<String>>,
}

/// Read `path` and project each row onto `columns`. A missing file yields
/// `None`.
pub(crate) async fn read_projection(path: &Path, columns: &[&str]) -> Result<Option<Projection>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    if bytes.is_empty() {
        return Ok(Some(Projection { rows: Vec::new() }));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .from_reader(bytes.as_slice());

    let headers = reader.headers()?.clone();
    let indices = columns
        .iter()
        .map(|column| {
            headers
                .iter()
                .position(|h| h.trim_start_matches('\u{feff}') == *column)
                .ok_or_else(|| Error::Malformed {
                    path: path.to_path_buf(),
                    reason: format!("missing column {:?}", column),
                })
        })
        .collect::<Result<Vec<usize>>>()?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(str::is_empty) {
            continue;
        }

        let row = indices
            .iter()
            .map(|&i| {
                record.get(i).map(str::to_string).ok_or_else(|| Error::Malformed {
                    path: path.to_path_buf(),
                    reason: format!(
                        "line {} has only {} fields",
                        record.position().map_or(0, |p| p.line()),
                        record.len()
                    ),
                })
            })
            .collect::<Result<Vec<String>>>()?;
        rows.push(row);
    }

    Ok(Some(Projection { rows }))
}

/// Both stores are append logs: keep the last row written for each name, at
/// the position of that last row.
pub(crate) fn keep_last<T>(rows: Vec<T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let total = rows.len();
    let mut seen = HashSet::new();
    let mut kept: Vec<T> = rows
        .into_iter()
        .rev()
        .filter(|row| seen.insert(name(row).to_string()))
        .collect();
    kept.reverse();

    if kept.len() < total {
        tracing::debug!("Collapsed {} superseded rows", total - kept.len());
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_projection_picks_columns_by_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table");
        tokio::fs::write(&path, "type|name|size\nstem|a|10\n\nbranch|b|20\n")
            .await
            .unwrap();

        let projection = read_projection(&path, &["name", "size"]).await.unwrap().unwrap();
        assert_eq!(
            projection.rows,
            vec![
                vec!["a".to_string(), "10".to_string()],
                vec!["b".to_string(), "20".to_string()],
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let projection = read_projection(&dir.path().join("absent"), &["name"]).await.unwrap();
        assert!(projection.is_none());
    }

    #[tokio::test]
    async fn test_missing_column_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table");
        tokio::fs::write(&path, "name|size\na|1\n").await.unwrap();

        let err = read_projection(&path, &["name", "time"]).await.err().unwrap();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_short_row_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table");
        tokio::fs::write(&path, "name|size|time\na|1\n").await.unwrap();

        let err = read_projection(&path, &["name", "time"]).await.err().unwrap();
        assert!(matches!(err, Error::Malformed { .. }));
    }

    #[test]
    fn test_keep_last_uses_last_position() {
        let rows = vec![("a", 1), ("b", 2), ("a", 3), ("c", 4)];
        let kept = keep_last(rows, |row| row.0);
        assert_eq!(kept, vec![("b", 2), ("a", 3), ("c", 4)]);
    }
}
