//! `metadatabase.min_max`: per-dataset min/max timestamp rows, populated
//! by views over the dataset's own connection tables and discriminated by
//! `beacon` (analysis-time aggregate vs. raw ingestion aggregate).

use rita_error::Result;
use rita_store::Session;
use rita_types::import::MinMaxRecord;

use crate::util::escape;
use crate::rows::MinMaxRow;

/// Upsert the min/max row for `dataset` (the table is a
/// `ReplacingMergeTree` keyed on `(dataset, rolling, beacon)`, so a later
/// insert with the same key supersedes an earlier one once merged).
pub async fn record(session: &Session, dataset: &str, rec: &MinMaxRecord) -> Result<()> {
    let row = MinMaxRow::from_record(dataset, rec);
    session.insert_batch("metadatabase.min_max", std::slice::from_ref(&row)).await
}

/// Fetch the min/max row for `dataset` under the given `(rolling, beacon)`
/// discriminators, if populated.
pub async fn query(session: &Session, dataset: &str, rolling: bool, beacon: bool) -> Result<Option<MinMaxRecord>> {
    let sql = format!(
        "SELECT dataset, rolling, beacon, min_ts, max_ts FROM metadatabase.min_max \
         WHERE dataset = '{dataset}' AND rolling = {rolling} AND beacon = {beacon} \
         ORDER BY min_ts LIMIT 1",
        dataset = escape(dataset),
        rolling = u8::from(rolling),
        beacon = u8::from(beacon),
    );
    let rows: Vec<MinMaxRow> = session.query(&sql).await?;
    Ok(rows.into_iter().next().map(MinMaxRow::into_record))
}
