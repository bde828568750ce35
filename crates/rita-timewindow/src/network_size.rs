//! Network-size counter (§4.8): the number of distinct internal hosts
//! observed across the beacon window's aggregate tables plus their
//! still-open raw counterparts.
//!
//! The nine address columns unioned here are `uconn.src_addr`,
//! `uconn.dst_addr`, `udns.src_addr`, `udns.dst_addr`, `usni.src_addr`
//! (the SNI aggregate carries no `dst_addr`; it groups by hostname
//! instead), `openconn.src_addr`, `openconn.dst_addr`, `openhttp.src_addr`
//! and `openhttp.dst_addr`. DNS has no "in-progress" state in the schema
//! (there is no `opendns` table), so it contributes only its hourly
//! aggregate; TLS/SSL is not one of the three named aggregates in this
//! count at all, so `openssl` is excluded.

use clickhouse::Row;
use rita_error::Result;
use rita_store::Session;
use rita_types::timestamp::TimestampUs;
use serde::Deserialize;

#[derive(Debug, Row, Deserialize)]
struct CountRow {
    count: u64,
}

/// Count the distinct internal hosts across the nine address columns
/// described above, using `cutoff` (the beacon window's `min-ts`,
/// truncated to the start of its hour) for the hourly aggregates and no
/// cutoff at all for the open tables.
pub async fn count(session: &Session, dataset: &str, cutoff: TimestampUs) -> Result<u64> {
    let cutoff_hour = cutoff.start_of_hour().0;
    let sql = format!(
        r#"
SELECT uniqExact(addr) AS count FROM (
    SELECT src_addr AS addr FROM {dataset}.uconn WHERE toUnixTimestamp64Micro(import_hour) >= {cutoff}
    UNION ALL
    SELECT dst_addr AS addr FROM {dataset}.uconn WHERE toUnixTimestamp64Micro(import_hour) >= {cutoff}
    UNION ALL
    SELECT src_addr AS addr FROM {dataset}.udns WHERE toUnixTimestamp64Micro(import_hour) >= {cutoff}
    UNION ALL
    SELECT dst_addr AS addr FROM {dataset}.udns WHERE toUnixTimestamp64Micro(import_hour) >= {cutoff}
    UNION ALL
    SELECT src_addr AS addr FROM {dataset}.usni WHERE toUnixTimestamp64Micro(import_hour) >= {cutoff}
    UNION ALL
    SELECT src_addr AS addr FROM {dataset}.openconn
    UNION ALL
    SELECT dst_addr AS addr FROM {dataset}.openconn
    UNION ALL
    SELECT src_addr AS addr FROM {dataset}.openhttp
    UNION ALL
    SELECT dst_addr AS addr FROM {dataset}.openhttp
)
"#,
        dataset = dataset,
        cutoff = cutoff_hour,
    );
    let rows: Vec<CountRow> = session.query(&sql).await?;
    Ok(rows.into_iter().next().map_or(0, |r| r.count))
}
