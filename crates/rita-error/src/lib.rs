//! Shared error taxonomy.
//!
//! Every library crate in the workspace returns `rita_error::Error` (or a
//! `Result<T>` alias of it) rather than `anyhow::Error`, so callers can
//! match on a specific failure instead of formatting an opaque chain.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error enum. Variants are grouped by the component that raises
/// them; each group corresponds to a "Kind" row in the design spec's error
/// table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("config file is empty: {0}")]
    ConfigFileEmpty(PathBuf),

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: json5::Error,
    },

    #[error("config validation failed:\n{0}")]
    ConfigValidate(String),

    #[error("invalid CIDR {cidr:?}: not a valid IP address")]
    ParseCidrInvalidIp { cidr: String },

    #[error("invalid CIDR {cidr:?}: invalid prefix mask")]
    ParseCidrInvalidMask { cidr: String },

    #[error("invalid FQDN {fqdn:?}: {reason}")]
    InvalidFqdn { fqdn: String, reason: &'static str },

    #[error("store connection failed: {0}")]
    StoreConnect(String),

    #[error("store query failed: {0}")]
    StoreQuery(String),

    #[error("no min/max timestamp rows for dataset {dataset:?}")]
    InvalidMinMaxTimestamp { dataset: String },

    #[error("no store session available for dataset {dataset:?}")]
    InvalidDatabaseConnection { dataset: String },

    #[error("dataset not found: {0}")]
    DatabaseNotFound(String),

    #[error("drop pattern {0:?} has neither a prefix nor a suffix wildcard")]
    InvalidDropPattern(String),

    #[error("bulk writer batch failed at record offset {offset}: {source}")]
    BulkWriterFatal {
        offset: u64,
        #[source]
        source: Box<Error>,
    },

    #[error("failed to fetch feed {feed:?}: {source}")]
    FeedFetch {
        feed: String,
        #[source]
        source: Box<Error>,
    },

    #[error("file does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// Spelling is intentionally preserved from the upstream error
    /// identifier; it is a stable, test-visible name.
    #[error("file is empty: {0}")]
    FileIsEmtpy(PathBuf),

    #[error("path is a directory, expected a file: {0}")]
    PathIsDir(PathBuf),

    #[error("directory does not exist: {0}")]
    DirDoesNotExist(PathBuf),

    #[error("directory is empty: {0}")]
    DirIsEmpty(PathBuf),

    #[error("path is not a directory: {0}")]
    PathIsNotDir(PathBuf),

    #[error("http request failed: {0}")]
    Http(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::BulkWriterFatal { .. })
    }
}
