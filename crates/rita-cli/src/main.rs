//! Binary entry point (§4.10). Wires config/environment loading, schema
//! setup, and the `sync-feeds`/`run-import`/`drop-dataset` subcommands;
//! owns the top-level cancellation token and the fatal-error exit path a
//! library crate never takes itself (§7: "terminate process via the
//! logger's fatal").

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Command};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    let args = Cli::parse();

    let cfg = match rita_config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config {}: {err}", args.config.display());
            std::process::exit(1);
        }
    };
    logging::init(cfg.env.log_level, cfg.env.logging_enabled);

    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("interrupt received, cancelling");
                cancel.cancel();
            }
        })
    };

    let result = match &args.command {
        Command::SyncFeeds => commands::sync_feeds(&cfg, &cancel).await,
        Command::RunImport { dataset, rolling, rebuild } => {
            commands::run_import(&cfg, dataset, *rolling, *rebuild, &cancel).await
        }
        Command::DropDataset { pattern } => commands::drop_dataset(&cfg, pattern, &cancel).await,
    };

    watcher.abort();

    if let Err(err) = result {
        if err.is_fatal() {
            tracing::error!(error = %err, "fatal error, terminating process");
            std::process::exit(1);
        }
        tracing::error!(error = %err, "command failed");
        std::process::exit(1);
    }
}
