//! Staging records: the immutable, per-event rows the bulk writer inserts
//! and the schema's materialized views aggregate.

use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fingerprint::Fingerprint;
use crate::timestamp::TimestampUs;

/// Connection-tuple fields shared by every staging record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointPair {
    pub src_addr: Ipv6Addr,
    pub src_nuid: Uuid,
    pub dst_addr: Ipv6Addr,
    pub dst_nuid: Uuid,
    pub src_local: bool,
    pub dst_local: bool,
}

impl EndpointPair {
    #[must_use]
    pub fn fingerprint(&self) -> Fingerprint {
        Fingerprint::from_endpoint_pair(self.src_addr, self.src_nuid, self.dst_addr, self.dst_nuid)
    }
}

/// A single TCP/UDP connection staging row (`conn`/`openconn`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub import_time: TimestampUs,
    pub zeek_uid: [u8; 16],
    pub fingerprint: Fingerprint,
    pub ts: TimestampUs,
    pub endpoints: EndpointPair,
    pub src_port: u16,
    pub dst_port: u16,
    pub proto: String,
    pub service: Option<String>,
    pub conn_state: Option<String>,
    pub duration_secs: Option<f64>,
    pub src_bytes: u64,
    pub dst_bytes: u64,
    pub src_pkts: u64,
    pub dst_pkts: u64,
    pub ip_bytes: u64,
    pub missing_host_header: bool,
    pub useragent: Option<String>,
    pub zeek_history: Option<String>,
}

/// A single DNS query/response staging row (`dns`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub import_time: TimestampUs,
    pub zeek_uid: [u8; 16],
    pub fingerprint: Fingerprint,
    pub ts: TimestampUs,
    pub endpoints: EndpointPair,
    pub query: String,
    pub answers: Vec<String>,
    pub qtype_name: Option<String>,
    pub rcode_name: Option<String>,
}

/// A single HTTP transaction staging row (`http`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpRecord {
    pub import_time: TimestampUs,
    pub zeek_uid: [u8; 16],
    pub fingerprint: Fingerprint,
    pub ts: TimestampUs,
    pub endpoints: EndpointPair,
    pub host: Option<String>,
    pub uri: Option<String>,
    pub useragent: Option<String>,
    pub method: Option<String>,
    pub mime_types: Vec<String>,
    pub missing_host_header: bool,
}

/// A single TLS handshake staging row (`ssl`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TlsRecord {
    pub import_time: TimestampUs,
    pub zeek_uid: [u8; 16],
    pub fingerprint: Fingerprint,
    pub ts: TimestampUs,
    pub endpoints: EndpointPair,
    pub server_name: Option<String>,
    pub ja3: Option<String>,
    pub validation_status: Option<String>,
    pub cert_fuids: Vec<String>,
}

/// Dispatch union accepted by the bulk writer's input channel. Each
/// variant maps to exactly one staging table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StagingRecord {
    Connection(Box<ConnectionRecord>),
    Dns(Box<DnsRecord>),
    Http(Box<HttpRecord>),
    Tls(Box<TlsRecord>),
}

impl StagingRecord {
    #[must_use]
    pub fn table_name(&self) -> &'static str {
        match self {
            StagingRecord::Connection(_) => "conn",
            StagingRecord::Dns(_) => "dns",
            StagingRecord::Http(_) => "http",
            StagingRecord::Tls(_) => "ssl",
        }
    }
}
