//! Store-row shapes for the metadatabase tables. Kept local to this crate
//! (rather than in `rita-types`, which stays free of `clickhouse`) since
//! these are wire encodings, not domain types; every function here
//! converts to/from the corresponding `rita_types` record.

use clickhouse::Row;
use serde::{Deserialize, Serialize};

use rita_types::import::{FileImportedRecord, ImportRecord, MinMaxRecord};

#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct FileRow {
    pub dataset: String,
    pub path: String,
    pub hash: String,
    pub import_id: [u8; 16],
    pub rolling: u8,
    pub ts: i64,
}

impl FileRow {
    pub fn from_record(dataset: &str, rec: &FileImportedRecord) -> Self {
        Self {
            dataset: dataset.to_string(),
            path: rec.path.clone(),
            hash: rec.hash.clone(),
            import_id: rec.import_id,
            rolling: u8::from(rec.rolling),
            ts: rec.ts.0,
        }
    }
}

#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct ImportRow {
    pub import_id: [u8; 16],
    pub dataset: String,
    pub rolling: u8,
    pub rebuild: u8,
    pub started_at: i64,
    pub ended_at: Option<i64>,
    pub min_ts_conn: Option<i64>,
    pub max_ts_conn: Option<i64>,
    pub min_ts_open_conn: Option<i64>,
    pub max_ts_open_conn: Option<i64>,
    pub version: String,
}

impl ImportRow {
    pub fn from_record(dataset: &str, rec: &ImportRecord) -> Self {
        Self {
            import_id: rec.import_id,
            dataset: dataset.to_string(),
            rolling: u8::from(rec.rolling),
            rebuild: u8::from(rec.rebuild),
            started_at: rec.started_at.0,
            ended_at: rec.ended_at.map(|t| t.0),
            min_ts_conn: rec.min_ts_conn.map(|t| t.0),
            max_ts_conn: rec.max_ts_conn.map(|t| t.0),
            min_ts_open_conn: rec.min_ts_open_conn.map(|t| t.0),
            max_ts_open_conn: rec.max_ts_open_conn.map(|t| t.0),
            version: rec.version.clone(),
        }
    }

    pub fn into_record(self) -> ImportRecord {
        use rita_types::timestamp::TimestampUs;
        ImportRecord {
            import_id: self.import_id,
            rolling: self.rolling != 0,
            database: self.dataset,
            rebuild: self.rebuild != 0,
            started_at: TimestampUs(self.started_at),
            ended_at: self.ended_at.map(TimestampUs),
            min_ts_conn: self.min_ts_conn.map(TimestampUs),
            max_ts_conn: self.max_ts_conn.map(TimestampUs),
            min_ts_open_conn: self.min_ts_open_conn.map(TimestampUs),
            max_ts_open_conn: self.max_ts_open_conn.map(TimestampUs),
            version: self.version,
        }
    }
}

#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct MinMaxRow {
    pub dataset: String,
    pub rolling: u8,
    pub beacon: u8,
    pub min_ts: i64,
    pub max_ts: i64,
}

impl MinMaxRow {
    pub fn from_record(dataset: &str, rec: &MinMaxRecord) -> Self {
        Self {
            dataset: dataset.to_string(),
            rolling: u8::from(rec.rolling),
            beacon: u8::from(rec.beacon),
            min_ts: rec.min_ts.0,
            max_ts: rec.max_ts.0,
        }
    }

    pub fn into_record(self) -> MinMaxRecord {
        use rita_types::timestamp::TimestampUs;
        MinMaxRecord {
            rolling: self.rolling != 0,
            beacon: self.beacon != 0,
            min_ts: TimestampUs(self.min_ts),
            max_ts: TimestampUs(self.max_ts),
        }
    }
}

#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct SampleDbRow {
    pub dataset: String,
    pub added_at: i64,
}

#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct DatasetRow {
    pub dataset: String,
}
