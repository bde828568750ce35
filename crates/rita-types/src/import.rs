//! Metadata-registry row types: imports, files, and min/max aggregates
//! (§3 "Import record" / "File-imported record", §4.5).

use serde::{Deserialize, Serialize};

use crate::timestamp::TimestampUs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub import_id: [u8; 16],
    pub rolling: bool,
    pub database: String,
    pub rebuild: bool,
    pub started_at: TimestampUs,
    pub ended_at: Option<TimestampUs>,
    pub min_ts_conn: Option<TimestampUs>,
    pub max_ts_conn: Option<TimestampUs>,
    pub min_ts_open_conn: Option<TimestampUs>,
    pub max_ts_open_conn: Option<TimestampUs>,
    pub version: String,
}

impl ImportRecord {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.ended_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileImportedRecord {
    pub hash: String,
    pub database: String,
    pub import_id: [u8; 16],
    pub rolling: bool,
    pub ts: TimestampUs,
    pub path: String,
}

/// One row of `metadatabase.min_max`: a dataset's observed timestamp
/// span, discriminated by whether it came from beacon-window analysis or
/// raw ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinMaxRecord {
    pub rolling: bool,
    pub beacon: bool,
    pub min_ts: TimestampUs,
    pub max_ts: TimestampUs,
}
