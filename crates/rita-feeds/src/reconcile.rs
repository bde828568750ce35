//! The reconciliation algorithm itself (§4.6 steps 2-4): diff existing
//! feed records against the desired state, drop what's gone, refetch
//! what's stale, add what's new.

use std::collections::BTreeMap;

use rita_error::Result;
use rita_store::Session;
use rita_types::feed::FeedRecord;
use rita_types::fingerprint::Fingerprint;
use rita_types::timestamp::TimestampUs;
use tokio_util::sync::CancellationToken;

use crate::discover::DesiredFeed;
use crate::{fetch, parse, store, writer};

/// Outcome of one reconciliation pass, for logging/testing visibility.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub dropped: Vec<String>,
    pub refetched: Vec<String>,
    pub added: Vec<String>,
    pub unchanged: Vec<String>,
    pub walk_errors: Vec<String>,
}

/// Run one full reconciliation pass against `desired`.
pub async fn reconcile(
    session: &Session,
    http_client: &reqwest::Client,
    desired: &BTreeMap<String, DesiredFeed>,
    walk_errors: Vec<String>,
    cancel: &CancellationToken,
) -> Result<ReconcileSummary> {
    let mut summary = ReconcileSummary {
        walk_errors,
        ..ReconcileSummary::default()
    };

    let existing = store::all_feed_records(session).await?;
    let mut existing_paths: BTreeMap<String, FeedRecord> = BTreeMap::new();
    for rec in existing {
        existing_paths.insert(rec.path.clone(), rec);
    }

    for (path, rec) in &existing_paths {
        match desired.get(path) {
            None => {
                store::delete_feed_record(session, rec.fingerprint).await?;
                store::delete_entries(session, rec.fingerprint).await?;
                summary.dropped.push(path.clone());
            }
            Some(d) if d.online => {
                refetch(session, http_client, rec, d, cancel).await?;
                summary.refetched.push(path.clone());
            }
            Some(d) if d.last_modified_on_disk != rec.last_modified_on_disk => {
                refetch(session, http_client, rec, d, cancel).await?;
                summary.refetched.push(path.clone());
            }
            Some(_) => summary.unchanged.push(path.clone()),
        }
    }

    for (path, d) in desired {
        if existing_paths.contains_key(path) {
            continue;
        }
        let fingerprint = Fingerprint::from_feed_path(path);
        let content = fetch_content(http_client, d, cancel).await?;
        let entries = parse::parse_entries(fingerprint, &content);
        writer::stream_entries(session.clone(), &entries, cancel.clone()).await?;
        let rec = FeedRecord {
            fingerprint,
            path: path.clone(),
            online: d.online,
            last_modified_on_disk: d.last_modified_on_disk,
            last_modified_in_store: TimestampUs::now(),
        };
        store::upsert_feed_record(session, &rec).await?;
        summary.added.push(path.clone());
    }

    Ok(summary)
}

async fn refetch(
    session: &Session,
    http_client: &reqwest::Client,
    existing: &FeedRecord,
    desired: &DesiredFeed,
    cancel: &CancellationToken,
) -> Result<()> {
    store::delete_entries(session, existing.fingerprint).await?;
    let content = fetch_content(http_client, desired, cancel).await?;
    let entries = parse::parse_entries(existing.fingerprint, &content);
    writer::stream_entries(session.clone(), &entries, cancel.clone()).await?;
    let rec = FeedRecord {
        last_modified_on_disk: desired.last_modified_on_disk,
        last_modified_in_store: TimestampUs::now(),
        ..existing.clone()
    };
    store::upsert_feed_record(session, &rec).await
}

async fn fetch_content(http_client: &reqwest::Client, desired: &DesiredFeed, cancel: &CancellationToken) -> Result<String> {
    if desired.online {
        fetch::fetch_online(http_client, &desired.path, cancel).await
    } else {
        fetch::fetch_file(std::path::Path::new(&desired.path), cancel).await
    }
}
