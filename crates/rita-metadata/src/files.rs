//! `metadatabase.files`: already-imported file hashes per dataset, used by
//! check-if-files-were-already-imported.

use rita_error::Result;
use rita_store::Session;
use rita_types::import::FileImportedRecord;

use crate::rows::FileRow;
use crate::util::escape;

/// Record that `path` (with content `hash`) has been imported into
/// `dataset`.
pub async fn record_file(session: &Session, dataset: &str, rec: &FileImportedRecord) -> Result<()> {
    let row = FileRow::from_record(dataset, rec);
    session.insert_batch("metadatabase.files", std::slice::from_ref(&row)).await
}

/// Return the set of paths already recorded as imported for `dataset`.
pub async fn imported_paths(session: &Session, dataset: &str) -> Result<Vec<String>> {
    let sql = format!(
        "SELECT path FROM metadatabase.files WHERE dataset = '{dataset}'",
        dataset = escape(dataset)
    );
    let rows: Vec<PathOnly> = session.query(&sql).await?;
    Ok(rows.into_iter().map(|r| r.path).collect())
}

/// `true` iff a file with this exact path and hash is already recorded
/// for `dataset`.
pub async fn already_imported(session: &Session, dataset: &str, path: &str, hash: &str) -> Result<bool> {
    let sql = format!(
        "SELECT count() AS n FROM metadatabase.files WHERE dataset = '{dataset}' AND path = '{path}' AND hash = '{hash}'",
        dataset = escape(dataset),
        path = escape(path),
        hash = escape(hash),
    );
    let rows: Vec<Count> = session.query(&sql).await?;
    Ok(rows.first().is_some_and(|r| r.n > 0))
}

#[derive(Debug, Clone, clickhouse::Row, serde::Deserialize)]
struct PathOnly {
    path: String,
}

#[derive(Debug, Clone, Copy, clickhouse::Row, serde::Deserialize)]
struct Count {
    n: u64,
}
