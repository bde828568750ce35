//! Replaces `metadatabase.valid_mime_types` with the freshly parsed CSV
//! contents at startup.

use clickhouse::Row;
use rita_error::Result;
use rita_store::Session;
use serde::Serialize;

use crate::csv::MimeTypeExtension;

#[derive(Debug, Clone, Row, Serialize)]
struct ValidMimeTypeRow {
    mime_type: String,
    extension: String,
}

/// Truncate and repopulate `metadatabase.valid_mime_types`.
pub async fn sync_registry(session: &Session, entries: &[MimeTypeExtension]) -> Result<()> {
    session.execute("TRUNCATE TABLE metadatabase.valid_mime_types").await?;
    let rows: Vec<ValidMimeTypeRow> = entries
        .iter()
        .map(|e| ValidMimeTypeRow {
            mime_type: e.mime_type.clone(),
            extension: e.extension.clone(),
        })
        .collect();
    session.insert_batch("metadatabase.valid_mime_types", &rows).await?;
    tracing::info!(count = rows.len(), "mime-type registry synced");
    Ok(())
}
