//! Argument parsing (§4.10): `clap`'s derive API, matching the example
//! pack's usual CLI-parsing choice.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "rita", about = "Analytic ingest and scoring core", version)]
pub struct Cli {
    /// Path to the JSON5 config file.
    #[arg(long, env = "RITA_CONFIG", default_value = "/etc/rita/config.json5")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile the threat-intel feeds and MIME-type registry against config.
    SyncFeeds,
    /// Run (or continue) an import for a dataset.
    RunImport {
        dataset: String,
        #[arg(long, conflicts_with = "rebuild")]
        rolling: bool,
        #[arg(long, conflicts_with = "rolling")]
        rebuild: bool,
    },
    /// Drop every dataset matching a prefix-, suffix-, or both-wildcard pattern.
    DropDataset { pattern: String },
}
