//! Read/write access to `metadatabase.threat_intel` and
//! `metadatabase.threat_intel_feeds`.

use rita_error::Result;
use rita_store::Session;
use rita_types::feed::{FeedEntry, FeedRecord};
use rita_types::fingerprint::Fingerprint;

use crate::rows::{EntryRow, FeedRow};

pub async fn all_feed_records(session: &Session) -> Result<Vec<FeedRecord>> {
    let rows: Vec<FeedRow> = session
        .query("SELECT fingerprint, path, online, last_modified_on_disk, last_modified_in_store FROM metadatabase.threat_intel_feeds")
        .await?;
    Ok(rows.into_iter().map(FeedRow::into_record).collect())
}

pub async fn upsert_feed_record(session: &Session, rec: &FeedRecord) -> Result<()> {
    let row = FeedRow::from_record(rec);
    session
        .insert_batch("metadatabase.threat_intel_feeds", std::slice::from_ref(&row))
        .await
}

pub async fn delete_feed_record(session: &Session, fingerprint: Fingerprint) -> Result<()> {
    let hex = fingerprint.to_string();
    session
        .execute(&format!(
            "ALTER TABLE metadatabase.threat_intel_feeds DELETE WHERE hex(fingerprint) = upper('{hex}')"
        ))
        .await
}

pub async fn delete_entries(session: &Session, fingerprint: Fingerprint) -> Result<()> {
    let hex = fingerprint.to_string();
    session
        .execute(&format!(
            "ALTER TABLE metadatabase.threat_intel DELETE WHERE hex(feed_fingerprint) = upper('{hex}')"
        ))
        .await
}

pub async fn insert_entries(session: &Session, entries: &[FeedEntry]) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let rows: Vec<EntryRow> = entries.iter().map(EntryRow::from_entry).collect();
    session.insert_batch("metadatabase.threat_intel", &rows).await
}
