//! Streams parsed feed entries through a `rita_bulkwriter::BulkWriter`
//! instance, per spec.md's "valid entries are sent to the bulk writer for
//! `metadatabase.threat_intel`" (§4.6) rather than a direct batch insert.

use rita_bulkwriter::{BulkWriter, WriterConfig};
use rita_error::{Error, Result};
use rita_store::Session;
use rita_types::feed::FeedEntry;
use tokio_util::sync::CancellationToken;

use crate::rows::EntryRow;

/// Push every entry through a one-shot bulk writer and wait for the
/// worker pool to drain. A feed sync's entry count is small relative to
/// the ingest path's staging tables, so a single worker is sufficient.
pub async fn stream_entries(session: Session, entries: &[FeedEntry], cancel: CancellationToken) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let config = WriterConfig {
        table: "metadatabase.threat_intel".to_string(),
        batch_size: entries.len().min(25_000).max(1),
        worker_count: 1,
    };
    let mut writer = BulkWriter::<EntryRow>::new(config, session, cancel);
    let tx = writer.sender();
    for entry in entries {
        let _ = tx.send(EntryRow::from_entry(entry));
    }
    drop(tx);
    writer.close();

    let handle = tokio::runtime::Handle::current();
    tokio::task::spawn_blocking(move || writer.run(&handle))
        .await
        .map_err(|e| Error::StoreQuery(format!("bulk writer task panicked: {e}")))??;
    Ok(())
}
