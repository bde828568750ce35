//! Per-dataset DDL (§4.4). Every function takes the dataset name (used as
//! the ClickHouse database) and the dataset's rolling flag, since TTLs
//! only apply to rolling datasets (§4.4's "TTL policy (rolling datasets
//! only)"); a non-rolling (historic) dataset keeps the same table shapes
//! with no TTL clause, retaining data until the dataset itself is dropped.

fn ttl_clause(rolling: bool, column: &str, interval: &str) -> String {
    if rolling {
        format!("TTL {column} + INTERVAL {interval}")
    } else {
        String::new()
    }
}

/// `conn`: the TCP/UDP connection staging table.
#[must_use]
pub fn conn_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_time", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.conn (
    import_time       DateTime64(6, 'UTC'),
    zeek_uid           FixedString(16),
    fingerprint        FixedString(16),
    ts                 DateTime64(6, 'UTC'),
    src_addr           IPv6,
    src_nuid           UUID,
    dst_addr           IPv6,
    dst_nuid           UUID,
    src_local          UInt8,
    dst_local          UInt8,
    src_port           UInt16,
    dst_port           UInt16,
    proto              LowCardinality(String),
    service            LowCardinality(String),
    conn_state         LowCardinality(String),
    duration_secs      Float64,
    src_bytes          UInt64,
    dst_bytes          UInt64,
    src_pkts           UInt64,
    dst_pkts           UInt64,
    ip_bytes           UInt64,
    missing_host_header UInt8,
    useragent          Nullable(String),
    zeek_history       String
) ENGINE = MergeTree()
PARTITION BY toYYYYMMDD(ts)
ORDER BY (fingerprint, ts)
{ttl}
"#
    )
}

/// `ssl`: the TLS handshake staging table.
#[must_use]
pub fn ssl_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_time", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.ssl (
    import_time    DateTime64(6, 'UTC'),
    zeek_uid        FixedString(16),
    fingerprint     FixedString(16),
    ts              DateTime64(6, 'UTC'),
    src_addr        IPv6,
    src_nuid        UUID,
    dst_addr        IPv6,
    dst_nuid        UUID,
    server_name     Nullable(String),
    ja3             Nullable(String),
    validation_status Nullable(String),
    cert_fuids      Array(String)
) ENGINE = MergeTree()
PARTITION BY toYYYYMMDD(ts)
ORDER BY (fingerprint, ts)
{ttl}
"#
    )
}

/// `http`: the HTTP transaction staging table.
#[must_use]
pub fn http_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_time", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.http (
    import_time    DateTime64(6, 'UTC'),
    zeek_uid        FixedString(16),
    fingerprint     FixedString(16),
    ts              DateTime64(6, 'UTC'),
    src_addr        IPv6,
    src_nuid        UUID,
    dst_addr        IPv6,
    dst_nuid        UUID,
    host            Nullable(String),
    uri             Nullable(String),
    useragent       Nullable(String),
    method          LowCardinality(String),
    mime_types      Array(String),
    missing_host_header UInt8
) ENGINE = MergeTree()
PARTITION BY toYYYYMMDD(ts)
ORDER BY (fingerprint, ts)
{ttl}
"#
    )
}

/// `dns`: the DNS query staging table.
#[must_use]
pub fn dns_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_time", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.dns (
    import_time    DateTime64(6, 'UTC'),
    zeek_uid        FixedString(16),
    fingerprint     FixedString(16),
    ts              DateTime64(6, 'UTC'),
    src_addr        IPv6,
    src_nuid        UUID,
    dst_addr        IPv6,
    dst_nuid        UUID,
    query           Nullable(String),
    answers         Array(String)
) ENGINE = MergeTree()
PARTITION BY toYYYYMMDD(ts)
ORDER BY (fingerprint, ts)
{ttl}
"#
    )
}

/// `pdns_raw`: passive-DNS raw staging table, day-partitioned since its
/// aggregate (`pdns`) rolls up by day rather than by hour.
#[must_use]
pub fn pdns_raw_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_time", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.pdns_raw (
    import_time DateTime64(6, 'UTC'),
    fingerprint  FixedString(16),
    ts           DateTime64(6, 'UTC'),
    query        String,
    answer       String
) ENGINE = MergeTree()
PARTITION BY toYYYYMMDD(ts)
ORDER BY (fingerprint, ts)
{ttl}
"#
    )
}

fn open_table(dataset: &str, name: &str, like: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_time", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.{name} AS {dataset}.{like}
{ttl}
"#
    )
}

/// `openconn`, `openhttp`, `openssl`: open-connection counterparts of the
/// staging tables, same shape, populated separately by the ingest side
/// for connections still in progress at import time.
#[must_use]
pub fn openconn_table(dataset: &str, rolling: bool) -> String {
    open_table(dataset, "openconn", "conn", rolling)
}

#[must_use]
pub fn openhttp_table(dataset: &str, rolling: bool) -> String {
    open_table(dataset, "openhttp", "http", rolling)
}

#[must_use]
pub fn openssl_table(dataset: &str, rolling: bool) -> String {
    open_table(dataset, "openssl", "ssl", rolling)
}

/// `uconn`: hourly unique-connection aggregate over `conn`, using
/// AggregatingMergeTree state functions so a staging insert transparently
/// produces the aggregate — no client-side aggregation code ever runs.
#[must_use]
pub fn uconn_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_hour", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.uconn (
    import_hour     DateTime('UTC'),
    fingerprint      FixedString(16),
    src_addr         IPv6,
    dst_addr         IPv6,
    count_state          AggregateFunction(count),
    unique_ts_state      AggregateFunction(uniq, DateTime64(6, 'UTC')),
    ts_list_state        AggregateFunction(groupArray(1000), DateTime64(6, 'UTC')),
    bytes_list_state     AggregateFunction(groupArray(1000), UInt64),
    total_bytes_state    AggregateFunction(sum, UInt64),
    min_ts_state         AggregateFunction(min, DateTime64(6, 'UTC')),
    max_ts_state         AggregateFunction(max, DateTime64(6, 'UTC'))
) ENGINE = AggregatingMergeTree()
PARTITION BY toYYYYMMDD(import_hour)
ORDER BY (fingerprint, import_hour)
{ttl}
"#
    )
}

#[must_use]
pub fn uconn_mv(dataset: &str) -> String {
    format!(
        r#"
CREATE MATERIALIZED VIEW IF NOT EXISTS {dataset}.uconn_mv
TO {dataset}.uconn AS
SELECT
    toStartOfHour(ts) AS import_hour,
    fingerprint,
    src_addr,
    dst_addr,
    countState() AS count_state,
    uniqState(ts) AS unique_ts_state,
    groupArrayState(1000)(ts) AS ts_list_state,
    groupArrayState(1000)(ip_bytes) AS bytes_list_state,
    sumState(ip_bytes) AS total_bytes_state,
    minState(ts) AS min_ts_state,
    maxState(ts) AS max_ts_state
FROM {dataset}.conn
GROUP BY import_hour, fingerprint, src_addr, dst_addr
"#
    )
}

/// `udns`: hourly unique-DNS-pair aggregate over `dns`.
#[must_use]
pub fn udns_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_hour", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.udns (
    import_hour   DateTime('UTC'),
    fingerprint    FixedString(16),
    src_addr       IPv6,
    dst_addr       IPv6,
    count_state        AggregateFunction(count),
    unique_ts_state     AggregateFunction(uniq, DateTime64(6, 'UTC')),
    min_ts_state        AggregateFunction(min, DateTime64(6, 'UTC')),
    max_ts_state        AggregateFunction(max, DateTime64(6, 'UTC'))
) ENGINE = AggregatingMergeTree()
PARTITION BY toYYYYMMDD(import_hour)
ORDER BY (fingerprint, import_hour)
{ttl}
"#
    )
}

#[must_use]
pub fn udns_mv(dataset: &str) -> String {
    format!(
        r#"
CREATE MATERIALIZED VIEW IF NOT EXISTS {dataset}.udns_mv
TO {dataset}.udns AS
SELECT
    toStartOfHour(ts) AS import_hour,
    fingerprint,
    src_addr,
    dst_addr,
    countState() AS count_state,
    uniqState(ts) AS unique_ts_state,
    minState(ts) AS min_ts_state,
    maxState(ts) AS max_ts_state
FROM {dataset}.dns
GROUP BY import_hour, fingerprint, src_addr, dst_addr
"#
    )
}

/// `usni`: hourly unique-SNI-pair aggregate over `http` (HTTP rows, per
/// §4.8's network-size counter source list).
#[must_use]
pub fn usni_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_hour", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.usni (
    import_hour   DateTime('UTC'),
    fingerprint    FixedString(16),
    src_addr       IPv6,
    host           Nullable(String),
    count_state        AggregateFunction(count),
    min_ts_state        AggregateFunction(min, DateTime64(6, 'UTC')),
    max_ts_state        AggregateFunction(max, DateTime64(6, 'UTC'))
) ENGINE = AggregatingMergeTree()
PARTITION BY toYYYYMMDD(import_hour)
ORDER BY (fingerprint, import_hour)
{ttl}
"#
    )
}

#[must_use]
pub fn usni_mv(dataset: &str) -> String {
    format!(
        r#"
CREATE MATERIALIZED VIEW IF NOT EXISTS {dataset}.usni_mv
TO {dataset}.usni AS
SELECT
    toStartOfHour(ts) AS import_hour,
    fingerprint,
    src_addr,
    host,
    countState() AS count_state,
    minState(ts) AS min_ts_state,
    maxState(ts) AS max_ts_state
FROM {dataset}.http
GROUP BY import_hour, fingerprint, src_addr, host
"#
    )
}

/// `pdns`: day-granularity aggregate over `pdns_raw`.
#[must_use]
pub fn pdns_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_day", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.pdns (
    import_day   Date,
    query         String,
    answer_state  AggregateFunction(groupUniqArray, String),
    count_state   AggregateFunction(count)
) ENGINE = AggregatingMergeTree()
PARTITION BY toYYYYMM(import_day)
ORDER BY (query, import_day)
{ttl}
"#
    )
}

#[must_use]
pub fn pdns_mv(dataset: &str) -> String {
    format!(
        r#"
CREATE MATERIALIZED VIEW IF NOT EXISTS {dataset}.pdns_mv
TO {dataset}.pdns AS
SELECT
    toDate(ts) AS import_day,
    query,
    groupUniqArrayState(answer) AS answer_state,
    countState() AS count_state
FROM {dataset}.pdns_raw
GROUP BY import_day, query
"#
    )
}

fn snapshot_table(dataset: &str, name: &str, columns: &str, order_by: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "snapshotted_at", "2 WEEK");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.{name} (
    snapshotted_at DateTime64(6, 'UTC'),
{columns}
) ENGINE = MergeTree()
PARTITION BY toYYYYMMDD(snapshotted_at)
ORDER BY {order_by}
{ttl}
"#
    )
}

/// `exploded_dns`: one row per (query, sub-label) for exploding multi-label
/// domains into analyzable components.
#[must_use]
pub fn exploded_dns_table(dataset: &str, rolling: bool) -> String {
    snapshot_table(
        dataset,
        "exploded_dns",
        "    fqdn   String,\n    subdomain String,\n    count  UInt64",
        "(fqdn, snapshotted_at)",
        rolling,
    )
}

/// `big_ol_histogram`: the connection-timing histogram snapshot used by
/// the beacon analytic.
#[must_use]
pub fn big_ol_histogram_table(dataset: &str, rolling: bool) -> String {
    snapshot_table(
        dataset,
        "big_ol_histogram",
        "    fingerprint FixedString(16),\n    bucket_ms   UInt32,\n    count       UInt64",
        "(fingerprint, snapshotted_at)",
        rolling,
    )
}

#[must_use]
pub fn tls_proto_table(dataset: &str, rolling: bool) -> String {
    snapshot_table(
        dataset,
        "tls_proto",
        "    fingerprint FixedString(16),\n    ja3         String,\n    count       UInt64",
        "(fingerprint, snapshotted_at)",
        rolling,
    )
}

#[must_use]
pub fn http_proto_table(dataset: &str, rolling: bool) -> String {
    snapshot_table(
        dataset,
        "http_proto",
        "    fingerprint FixedString(16),\n    useragent   String,\n    count       UInt64",
        "(fingerprint, snapshotted_at)",
        rolling,
    )
}

/// `mime_type_uris`: hourly aggregate of observed MIME type vs. URI
/// extension, the input to the MIME-mismatch modifier.
#[must_use]
pub fn mime_type_uris_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "import_hour", "26 HOUR");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.mime_type_uris (
    import_hour DateTime('UTC'),
    fingerprint  FixedString(16),
    uri          String,
    mime_type    String,
    count_state  AggregateFunction(count)
) ENGINE = AggregatingMergeTree()
PARTITION BY toYYYYMMDD(import_hour)
ORDER BY (fingerprint, import_hour)
{ttl}
"#
    )
}

#[must_use]
pub fn mime_type_uris_mv(dataset: &str) -> String {
    format!(
        r#"
CREATE MATERIALIZED VIEW IF NOT EXISTS {dataset}.mime_type_uris_mv
TO {dataset}.mime_type_uris AS
SELECT
    toStartOfHour(ts) AS import_hour,
    fingerprint,
    uri,
    mime_type,
    countState() AS count_state
FROM {dataset}.http
ARRAY JOIN mime_types AS mime_type
WHERE uri IS NOT NULL
GROUP BY import_hour, fingerprint, uri, mime_type
"#
    )
}

#[must_use]
pub fn rare_signatures_table(dataset: &str, rolling: bool) -> String {
    snapshot_table(
        dataset,
        "rare_signatures",
        "    fingerprint FixedString(16),\n    signature   String,\n    count       UInt64",
        "(fingerprint, snapshotted_at)",
        rolling,
    )
}

#[must_use]
pub fn port_info_table(dataset: &str, rolling: bool) -> String {
    snapshot_table(
        dataset,
        "port_info",
        "    port   UInt16,\n    proto  LowCardinality(String),\n    count  UInt64",
        "(port, snapshotted_at)",
        rolling,
    )
}

/// `threat_mixtape`: the final per-pair indicator row, keyed per §4.9 by
/// (analyzed_at, dst_nuid, src_nuid, src, fqdn, dst, fingerprint).
#[must_use]
pub fn threat_mixtape_table(dataset: &str, rolling: bool) -> String {
    let ttl = ttl_clause(rolling, "analyzed_at", "2 WEEK");
    format!(
        r#"
CREATE TABLE IF NOT EXISTS {dataset}.threat_mixtape (
    analyzed_at  DateTime64(6, 'UTC'),
    dst_nuid      UUID,
    src_nuid      UUID,
    src           IPv6,
    fqdn          Nullable(String),
    dst           IPv6,
    fingerprint   FixedString(16),
    beacon_score      Nullable(Float64),
    long_conn_score   Nullable(Float64),
    strobe_score      Nullable(Float64),
    threat_intel_score Nullable(Float64),
    c2_dns_score      Nullable(Float64),
    total_score       Float64,
    impact_category   LowCardinality(String),
    evidence          Array(String)
) ENGINE = MergeTree()
PARTITION BY toYYYYMMDD(analyzed_at)
ORDER BY (fingerprint, analyzed_at)
{ttl}
"#
    )
}

/// All dataset-scoped DDL statements, in dependency order: the database
/// itself, then staging tables, then their views, then snapshot/final
/// tables. Run through [`rita_store::Session::execute`] in order.
#[must_use]
pub fn all_statements(dataset: &str, rolling: bool) -> Vec<String> {
    vec![
        format!("CREATE DATABASE IF NOT EXISTS {dataset}"),
        conn_table(dataset, rolling),
        http_table(dataset, rolling),
        ssl_table(dataset, rolling),
        dns_table(dataset, rolling),
        pdns_raw_table(dataset, rolling),
        openconn_table(dataset, rolling),
        openhttp_table(dataset, rolling),
        openssl_table(dataset, rolling),
        uconn_table(dataset, rolling),
        uconn_mv(dataset),
        usni_table(dataset, rolling),
        usni_mv(dataset),
        udns_table(dataset, rolling),
        udns_mv(dataset),
        pdns_table(dataset, rolling),
        pdns_mv(dataset),
        exploded_dns_table(dataset, rolling),
        big_ol_histogram_table(dataset, rolling),
        tls_proto_table(dataset, rolling),
        http_proto_table(dataset, rolling),
        mime_type_uris_table(dataset, rolling),
        mime_type_uris_mv(dataset),
        port_info_table(dataset, rolling),
        rare_signatures_table(dataset, rolling),
        threat_mixtape_table(dataset, rolling),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rolling_dataset_carries_staging_ttl() {
        let ddl = conn_table("mynet", true);
        assert!(ddl.contains("TTL import_time + INTERVAL 26 HOUR"));
    }

    #[test]
    fn historic_dataset_has_no_ttl() {
        let ddl = conn_table("mynet", false);
        assert!(!ddl.contains("TTL"));
    }

    #[test]
    fn all_statements_covers_every_named_table() {
        let stmts = all_statements("mynet", true).join("\n");
        for table in [
            "conn", "http", "ssl", "dns", "pdns_raw", "openconn", "openhttp", "openssl", "uconn",
            "usni", "udns", "pdns", "exploded_dns", "big_ol_histogram", "tls_proto", "http_proto",
            "mime_type_uris", "port_info", "rare_signatures", "threat_mixtape",
        ] {
            assert!(
                stmts.contains(&format!("mynet.{table}")),
                "missing DDL for {table}"
            );
        }
    }

    #[test]
    fn mixtape_uses_spec_key_columns() {
        let ddl = threat_mixtape_table("mynet", false);
        for col in ["analyzed_at", "dst_nuid", "src_nuid", "src", "fqdn", "dst", "fingerprint"] {
            assert!(ddl.contains(col));
        }
    }
}
