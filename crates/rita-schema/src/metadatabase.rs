//! The shared `metadatabase` schema (§4.4, §4.5): cross-dataset registries
//! that outlive any single dataset's lifetime.

const DB: &str = "metadatabase";

#[must_use]
pub fn create_database() -> String {
    format!("CREATE DATABASE IF NOT EXISTS {DB}")
}

/// `files`: already-imported file hashes per dataset/log-type, used by
/// `check-if-files-were-already-imported`. Rolling files are kept 180
/// days; non-rolling entries are retained indefinitely (until the owning
/// dataset is dropped and its rows are explicitly removed).
#[must_use]
pub fn files_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.files (
    dataset    LowCardinality(String),
    path       String,
    hash       String,
    import_id  FixedString(16),
    rolling    UInt8,
    ts         DateTime64(6, 'UTC')
) ENGINE = MergeTree()
ORDER BY (dataset, hash)
TTL if(rolling = 1, ts + INTERVAL 180 DAY, ts + INTERVAL 100 YEAR)
"#
    )
}

/// `imports`: append-only two-phase import log; a dataset's latest import
/// is the row with the greatest `started_at`. Retained 1 year.
#[must_use]
pub fn imports_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.imports (
    import_id            FixedString(16),
    dataset               LowCardinality(String),
    rolling               UInt8,
    rebuild               UInt8,
    started_at            DateTime64(6, 'UTC'),
    ended_at              Nullable(DateTime64(6, 'UTC')),
    min_ts_conn           Nullable(DateTime64(6, 'UTC')),
    max_ts_conn           Nullable(DateTime64(6, 'UTC')),
    min_ts_open_conn      Nullable(DateTime64(6, 'UTC')),
    max_ts_open_conn      Nullable(DateTime64(6, 'UTC')),
    version               String
) ENGINE = MergeTree()
ORDER BY (dataset, started_at)
TTL started_at + INTERVAL 1 YEAR
"#
    )
}

/// `min_max`: per-dataset min/max-timestamp rows, discriminated by
/// `beacon` (analysis-time aggregate vs. raw ingestion aggregate) and by
/// `rolling`. Populated by views over each dataset's own connection
/// tables, not written directly by application code.
#[must_use]
pub fn min_max_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.min_max (
    dataset  LowCardinality(String),
    rolling  UInt8,
    beacon   UInt8,
    min_ts   DateTime64(6, 'UTC'),
    max_ts   DateTime64(6, 'UTC')
) ENGINE = ReplacingMergeTree()
ORDER BY (dataset, rolling, beacon)
"#
    )
}

#[must_use]
pub fn sample_dbs_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.sample_dbs (
    dataset   LowCardinality(String),
    added_at  DateTime64(6, 'UTC')
) ENGINE = MergeTree()
ORDER BY dataset
"#
    )
}

/// `threat_intel`: feed entries (§4.6), one row per IP-or-FQDN.
#[must_use]
pub fn threat_intel_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.threat_intel (
    feed_fingerprint FixedString(16),
    ip                Nullable(IPv6),
    fqdn              Nullable(String)
) ENGINE = MergeTree()
ORDER BY (feed_fingerprint, fqdn, ip)
"#
    )
}

/// `threat_intel_feeds`: one row per configured feed (online or custom
/// file), tracking staleness for the reconciliation algorithm in §4.6.
#[must_use]
pub fn threat_intel_feeds_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.threat_intel_feeds (
    fingerprint              FixedString(16),
    path                      String,
    online                    UInt8,
    last_modified_on_disk     DateTime64(6, 'UTC'),
    last_modified_in_store    DateTime64(6, 'UTC')
) ENGINE = ReplacingMergeTree(last_modified_in_store)
ORDER BY fingerprint
"#
    )
}

#[must_use]
pub fn valid_mime_types_table() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.valid_mime_types (
    mime_type  String,
    extension   String
) ENGINE = ReplacingMergeTree()
ORDER BY mime_type
"#
    )
}

/// `historical_first_seen`: retained for the configured number of months
/// (1-60), used by the first-seen-age modifier.
#[must_use]
pub fn historical_first_seen_table(months_to_keep: u32) -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {DB}.historical_first_seen (
    fingerprint  FixedString(16),
    first_seen    DateTime64(6, 'UTC')
) ENGINE = ReplacingMergeTree()
ORDER BY fingerprint
TTL first_seen + INTERVAL {months_to_keep} MONTH
"#
    )
}

/// All metadatabase DDL statements, in dependency order.
#[must_use]
pub fn all_statements(months_to_keep_historical_first_seen: u32) -> Vec<String> {
    vec![
        create_database(),
        files_table(),
        imports_table(),
        min_max_table(),
        sample_dbs_table(),
        threat_intel_table(),
        threat_intel_feeds_table(),
        valid_mime_types_table(),
        historical_first_seen_table(months_to_keep_historical_first_seen),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn historical_first_seen_honors_configured_months() {
        let ddl = historical_first_seen_table(6);
        assert!(ddl.contains("INTERVAL 6 MONTH"));
    }

    #[test]
    fn all_statements_covers_every_named_table() {
        let stmts = all_statements(3).join("\n");
        for table in [
            "files",
            "imports",
            "min_max",
            "sample_dbs",
            "threat_intel",
            "threat_intel_feeds",
            "valid_mime_types",
            "historical_first_seen",
        ] {
            assert!(stmts.contains(&format!("{DB}.{table}")), "missing DDL for {table}");
        }
    }
}
