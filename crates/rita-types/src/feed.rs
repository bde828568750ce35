//! Threat-intel feed metadata and entries (§3 "Feed record"/"Feed entry").

use serde::{Deserialize, Serialize};

use crate::fingerprint::Fingerprint;
use crate::timestamp::TimestampUs;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub fingerprint: Fingerprint,
    pub path: String,
    pub online: bool,
    pub last_modified_on_disk: TimestampUs,
    pub last_modified_in_store: TimestampUs,
}

/// One validated entry belonging to a feed: either an IP or an FQDN, never
/// both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub feed_fingerprint: Fingerprint,
    pub ip: Option<std::net::Ipv6Addr>,
    pub fqdn: Option<String>,
}

impl FeedEntry {
    #[must_use]
    pub fn ip(feed_fingerprint: Fingerprint, ip: std::net::Ipv6Addr) -> Self {
        Self {
            feed_fingerprint,
            ip: Some(ip),
            fqdn: None,
        }
    }

    #[must_use]
    pub fn fqdn(feed_fingerprint: Fingerprint, fqdn: String) -> Self {
        Self {
            feed_fingerprint,
            ip: None,
            fqdn: Some(fqdn),
        }
    }
}
