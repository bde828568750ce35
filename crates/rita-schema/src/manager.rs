//! Idempotent schema creation, run at startup and on demand for new
//! datasets.

use rita_error::Result;
use rita_store::Session;

use crate::{metadatabase, tables};

/// Create (or confirm the existence of) every table and view for
/// `dataset`, in dependency order.
///
/// # Errors
/// Returns the first `Error::StoreQuery` hit; DDL is not transactional, so
/// a partial failure may leave earlier tables created — idempotent
/// `IF NOT EXISTS` DDL means a retry is always safe.
pub async fn create_dataset_schema(session: &Session, dataset: &str, rolling: bool) -> Result<()> {
    for stmt in tables::all_statements(dataset, rolling) {
        session.execute(&stmt).await?;
    }
    tracing::info!(dataset, rolling, "dataset schema ready");
    Ok(())
}

/// Create (or confirm the existence of) the shared metadatabase schema.
///
/// # Errors
/// Returns the first `Error::StoreQuery` hit.
pub async fn create_metadatabase_schema(
    session: &Session,
    months_to_keep_historical_first_seen: u32,
) -> Result<()> {
    for stmt in metadatabase::all_statements(months_to_keep_historical_first_seen) {
        session.execute(&stmt).await?;
    }
    tracing::info!("metadatabase schema ready");
    Ok(())
}
