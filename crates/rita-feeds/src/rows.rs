//! Store-row shapes for `metadatabase.threat_intel` and
//! `metadatabase.threat_intel_feeds`.

use clickhouse::Row;
use serde::{Deserialize, Serialize};

use rita_types::feed::{FeedEntry, FeedRecord};

#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct FeedRow {
    pub fingerprint: [u8; 16],
    pub path: String,
    pub online: u8,
    pub last_modified_on_disk: i64,
    pub last_modified_in_store: i64,
}

impl FeedRow {
    pub fn from_record(rec: &FeedRecord) -> Self {
        Self {
            fingerprint: rec.fingerprint.0,
            path: rec.path.clone(),
            online: u8::from(rec.online),
            last_modified_on_disk: rec.last_modified_on_disk.0,
            last_modified_in_store: rec.last_modified_in_store.0,
        }
    }

    pub fn into_record(self) -> FeedRecord {
        use rita_types::fingerprint::Fingerprint;
        use rita_types::timestamp::TimestampUs;
        FeedRecord {
            fingerprint: Fingerprint(self.fingerprint),
            path: self.path,
            online: self.online != 0,
            last_modified_on_disk: TimestampUs(self.last_modified_on_disk),
            last_modified_in_store: TimestampUs(self.last_modified_in_store),
        }
    }
}

#[derive(Debug, Clone, Row, Serialize, Deserialize)]
pub struct EntryRow {
    pub feed_fingerprint: [u8; 16],
    pub ip: Option<std::net::Ipv6Addr>,
    pub fqdn: Option<String>,
}

impl EntryRow {
    pub fn from_entry(entry: &FeedEntry) -> Self {
        Self {
            feed_fingerprint: entry.feed_fingerprint.0,
            ip: entry.ip,
            fqdn: entry.fqdn.clone(),
        }
    }
}
