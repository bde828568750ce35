//! Subcommand bodies. Each opens whatever sessions it needs and returns
//! the workspace's shared `Result`, so `main` can apply one uniform
//! fatal-error policy regardless of which subcommand ran.

use rita_config::Config;
use rita_error::Result;
use rita_store::{PoolConfig, Session};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

fn pool_config(cfg: &Config) -> PoolConfig {
    PoolConfig::default().with_max_execution_time(cfg.max_query_execution_time)
}

async fn metadatabase_session(cfg: &Config, cancel: &CancellationToken) -> Result<Session> {
    Session::connect(
        &cfg.env.db_address,
        &cfg.env.clickhouse_username,
        &cfg.env.clickhouse_password,
        Some("metadatabase"),
        pool_config(cfg),
        cancel.clone(),
    )
    .await
}

pub async fn sync_feeds(cfg: &Config, cancel: &CancellationToken) -> Result<()> {
    let session = metadatabase_session(cfg, cancel).await?;
    rita_schema::create_metadatabase_schema(&session, cfg.months_to_keep_historical_first_seen).await?;

    if cfg.env.http_extensions_csv_path.exists() {
        let entries = rita_mime::load(&cfg.env.http_extensions_csv_path)?;
        rita_mime::sync_registry(&session, &entries).await?;
    } else {
        tracing::warn!(path = %cfg.env.http_extensions_csv_path.display(), "mime-type CSV not found, skipping");
    }

    let http_client = reqwest::Client::new();
    let summary = rita_feeds::sync(
        &session,
        &http_client,
        &cfg.threat_intel.online_feeds,
        cfg.threat_intel.custom_feeds_directory.as_deref(),
        cancel,
    )
    .await?;
    tracing::info!(
        added = summary.added.len(),
        refetched = summary.refetched.len(),
        dropped = summary.dropped.len(),
        unchanged = summary.unchanged.len(),
        walk_errors = summary.walk_errors.len(),
        "feed sync complete"
    );
    Ok(())
}

pub async fn run_import(cfg: &Config, dataset: &str, rolling: bool, rebuild: bool, cancel: &CancellationToken) -> Result<()> {
    let metadatabase = metadatabase_session(cfg, cancel).await?;
    rita_schema::create_metadatabase_schema(&metadatabase, cfg.months_to_keep_historical_first_seen).await?;

    let dataset_session = metadatabase.with_database(dataset);
    rita_schema::create_dataset_schema(&dataset_session, dataset, rolling).await?;

    let import_id = *Uuid::new_v4().as_bytes();
    rita_metadata::start_import(&metadatabase, dataset, import_id, rolling, rebuild, env!("CARGO_PKG_VERSION")).await?;
    let started = rita_metadata::latest_import(&metadatabase, dataset)
        .await?
        .expect("just-started import must be visible to its own session");

    rita_orchestrator::reset_temp_tables(&dataset_session, dataset).await?;

    match rita_timewindow::true_window(Some(&dataset_session), dataset, rolling).await {
        Ok(window) => {
            let network_size = rita_timewindow::network_size(&dataset_session, dataset, window.min_ts).await?;
            tracing::info!(
                dataset,
                min_ts = window.min_ts.0,
                max_ts = window.max_ts.0,
                use_current_time = window.use_current_time,
                network_size,
                "analysis window resolved"
            );
            let summary = rita_orchestrator::run_cycle(&dataset_session, dataset, &[], &[], window.max_ts.0).await?;
            tracing::info!(dataset, stages_run = ?summary.stages_run, rows_finalized = summary.rows_finalized, "orchestrator cycle complete");
            rita_metadata::complete_import(
                &metadatabase,
                dataset,
                &started,
                Some(window.min_ts),
                Some(window.max_ts),
                None,
                None,
            )
            .await?;
        }
        Err(rita_error::Error::InvalidMinMaxTimestamp { .. }) => {
            tracing::warn!(dataset, "no min/max timestamps yet, completing import without a window");
            rita_metadata::complete_import(&metadatabase, dataset, &started, None, None, None, None).await?;
        }
        Err(other) => return Err(other),
    }

    tracing::info!(dataset, rolling, rebuild, "import complete");
    Ok(())
}

pub async fn drop_dataset(cfg: &Config, pattern: &str, cancel: &CancellationToken) -> Result<()> {
    let session = metadatabase_session(cfg, cancel).await?;
    let dropped = rita_metadata::drop_matching(&session, pattern).await?;
    tracing::info!(pattern, dropped = ?dropped, "drop complete");
    Ok(())
}
