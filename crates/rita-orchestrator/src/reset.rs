//! Temp-table reset (§4.9 step 1): every scratch table an analytic stage
//! or link-side staging step writes to is truncated before the stage
//! sequence runs, so a re-run never mixes data from the previous pass.

use rita_error::Result;
use rita_store::Session;

/// The temp/scratch tables reset before every orchestrator run, exactly
/// as named in the design spec's step 1: the three persistent "open
/// connection" snapshots plus the per-run scratch tables each analytic
/// stage writes its intermediate joins into. `IF EXISTS` tolerates the
/// scratch tables, which are created ad hoc by the external analytic
/// stages themselves rather than by this workspace's schema DDL.
pub const RESET_TABLES: &[&str] = &[
    "openconn",
    "openhttp",
    "openssl",
    "uconn_tmp",
    "openconnhash_tmp",
    "opensniconn_tmp",
    "sniconn_tmp",
    "dns_tmp",
    "conn_tmp",
    "ssl_tmp",
    "http_tmp",
    "openconn_tmp",
    "openssl_tmp",
    "openhttp_tmp",
];

/// Truncate every table in [`RESET_TABLES`] for `dataset`. Must complete
/// before any subsequent ingest or analytic stage runs against it.
pub async fn reset_temp_tables(session: &Session, dataset: &str) -> Result<()> {
    for table in RESET_TABLES {
        let sql = format!("TRUNCATE TABLE IF EXISTS {dataset}.{table}");
        session.execute(&sql).await?;
    }
    tracing::debug!(dataset, count = RESET_TABLES.len(), "reset temp tables");
    Ok(())
}
