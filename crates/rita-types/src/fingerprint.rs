//! Fingerprints: a 16-byte opaque join key derived from an endpoint tuple
//! (or from a feed's identifying path/URL).

use std::net::Ipv6Addr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A 16-byte opaque fingerprint. Equality is the only defined operation;
/// callers must not assume any structure beyond that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fingerprint(pub [u8; 16]);

impl Fingerprint {
    /// Derive a fingerprint from a (src, dst) endpoint tuple. The same
    /// tuple always yields the same fingerprint, which is the join key
    /// between staging rows and their aggregates.
    #[must_use]
    pub fn from_endpoint_pair(
        src_addr: Ipv6Addr,
        src_nuid: Uuid,
        dst_addr: Ipv6Addr,
        dst_nuid: Uuid,
    ) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&src_addr.octets());
        hasher.update(src_nuid.as_bytes());
        hasher.update(&dst_addr.octets());
        hasher.update(dst_nuid.as_bytes());
        Self::from_hasher(hasher)
    }

    /// Derive a fingerprint from a single endpoint (used for per-IP
    /// aggregates such as `usni`).
    #[must_use]
    pub fn from_endpoint(addr: Ipv6Addr, nuid: Uuid) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&addr.octets());
        hasher.update(nuid.as_bytes());
        Self::from_hasher(hasher)
    }

    /// Derive a fingerprint identifying a threat-intel feed from its path
    /// or URL.
    #[must_use]
    pub fn from_feed_path(path_or_url: &str) -> Self {
        let mut hasher = blake3::Hasher::new();
        hasher.update(path_or_url.as_bytes());
        Self::from_hasher(hasher)
    }

    fn from_hasher(hasher: blake3::Hasher) -> Self {
        let digest = hasher.finalize();
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&digest.as_bytes()[..16]);
        Self(bytes)
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tuple_yields_same_fingerprint() {
        let nuid = Uuid::nil();
        let a = Fingerprint::from_endpoint_pair(Ipv6Addr::LOCALHOST, nuid, Ipv6Addr::UNSPECIFIED, nuid);
        let b = Fingerprint::from_endpoint_pair(Ipv6Addr::LOCALHOST, nuid, Ipv6Addr::UNSPECIFIED, nuid);
        assert_eq!(a, b);
    }

    #[test]
    fn different_tuples_yield_different_fingerprints() {
        let nuid = Uuid::nil();
        let a = Fingerprint::from_endpoint_pair(Ipv6Addr::LOCALHOST, nuid, Ipv6Addr::UNSPECIFIED, nuid);
        let b = Fingerprint::from_endpoint_pair(Ipv6Addr::UNSPECIFIED, nuid, Ipv6Addr::LOCALHOST, nuid);
        assert_ne!(a, b);
    }

    #[test]
    fn feed_fingerprint_is_stable() {
        let a = Fingerprint::from_feed_path("https://example.com/feed.txt");
        let b = Fingerprint::from_feed_path("https://example.com/feed.txt");
        assert_eq!(a, b);
    }
}
