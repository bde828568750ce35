//! Fetching feed content: a GET for online feeds, a local read for custom
//! feeds, both cancellation-aware.

use std::path::Path;

use rita_error::{Error, Result};
use tokio_util::sync::CancellationToken;

/// Fetch an online feed's body via HTTP GET, honoring `cancel`.
pub async fn fetch_online(client: &reqwest::Client, url: &str, cancel: &CancellationToken) -> Result<String> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Http(format!("fetch of {url} cancelled"))),
        result = fetch_online_inner(client, url) => result,
    }
}

async fn fetch_online_inner(client: &reqwest::Client, url: &str) -> Result<String> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| Error::Http(format!("GET {url} failed: {e}")))?
        .error_for_status()
        .map_err(|e| Error::Http(format!("GET {url} returned an error status: {e}")))?;
    resp.text().await.map_err(|e| Error::Http(format!("reading body of {url} failed: {e}")))
}

/// Read a custom feed file from disk.
pub async fn fetch_file(path: &Path, cancel: &CancellationToken) -> Result<String> {
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(Error::Http(format!("read of {} cancelled", path.display()))),
        result = tokio::fs::read_to_string(path) => result.map_err(Error::Io),
    }
}
