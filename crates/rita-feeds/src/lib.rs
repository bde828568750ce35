//! Threat-intel feed synchronizer (§4.6): reconciles
//! `metadatabase.threat_intel_feeds`/`threat_intel` against a config's
//! online feed list and custom feeds directory.

mod rows;
mod writer;

pub mod discover;
pub mod fetch;
pub mod parse;
pub mod reconcile;
pub mod store;

pub use discover::{build_desired, DesiredFeed};
pub use reconcile::{reconcile, ReconcileSummary};

/// Run one full sync pass: build the desired state from config, then
/// reconcile the store against it.
pub async fn sync(
    session: &rita_store::Session,
    http_client: &reqwest::Client,
    online_feeds: &[String],
    custom_feeds_directory: Option<&str>,
    cancel: &tokio_util::sync::CancellationToken,
) -> rita_error::Result<ReconcileSummary> {
    let (desired, walk_errors) = build_desired(online_feeds, custom_feeds_directory);
    reconcile::reconcile(session, http_client, &desired, walk_errors, cancel).await
}
