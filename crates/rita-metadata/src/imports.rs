//! `metadatabase.imports`: append-only two-phase import log (§4.5). One
//! row is written when an import starts, a second when it completes; the
//! dataset's latest import is the row with the greatest `started_at`.

use rita_error::Result;
use rita_store::Session;
use rita_types::import::ImportRecord;
use rita_types::timestamp::TimestampUs;

use crate::util::escape;
use crate::rows::ImportRow;

/// Write the "start" row: no `ended_at`, no min/max timestamps yet.
pub async fn start_import(
    session: &Session,
    dataset: &str,
    import_id: [u8; 16],
    rolling: bool,
    rebuild: bool,
    version: &str,
) -> Result<()> {
    let rec = ImportRecord {
        import_id,
        rolling,
        database: dataset.to_string(),
        rebuild,
        started_at: TimestampUs::now(),
        ended_at: None,
        min_ts_conn: None,
        max_ts_conn: None,
        min_ts_open_conn: None,
        max_ts_open_conn: None,
        version: version.to_string(),
    };
    let row = ImportRow::from_record(dataset, &rec);
    session.insert_batch("metadatabase.imports", std::slice::from_ref(&row)).await
}

/// Append the "complete" row: same `import_id`, carries `ended_at` and the
/// observed min/max conn timestamps. Imports are append-only, so this does
/// not overwrite the start row; the latest-by-`started_at` query resolves
/// which one is current.
#[allow(clippy::too_many_arguments)]
pub async fn complete_import(
    session: &Session,
    dataset: &str,
    started: &ImportRecord,
    min_ts_conn: Option<TimestampUs>,
    max_ts_conn: Option<TimestampUs>,
    min_ts_open_conn: Option<TimestampUs>,
    max_ts_open_conn: Option<TimestampUs>,
) -> Result<()> {
    let rec = ImportRecord {
        ended_at: Some(TimestampUs::now()),
        min_ts_conn,
        max_ts_conn,
        min_ts_open_conn,
        max_ts_open_conn,
        ..started.clone()
    };
    let row = ImportRow::from_record(dataset, &rec);
    session.insert_batch("metadatabase.imports", std::slice::from_ref(&row)).await
}

/// The import with the greatest `started_at` for `dataset`, if any.
pub async fn latest_import(session: &Session, dataset: &str) -> Result<Option<ImportRecord>> {
    let sql = format!(
        "SELECT import_id, dataset, rolling, rebuild, started_at, ended_at, \
         min_ts_conn, max_ts_conn, min_ts_open_conn, max_ts_open_conn, version \
         FROM metadatabase.imports WHERE dataset = '{dataset}' \
         ORDER BY started_at DESC LIMIT 1",
        dataset = escape(dataset)
    );
    let rows: Vec<ImportRow> = session.query(&sql).await?;
    Ok(rows.into_iter().next().map(ImportRow::into_record))
}
