//! Endpoint identity: a 128-bit canonical address plus the network UUID
//! that disambiguates overlapping RFC1918 spaces seen by different
//! sensors.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use rita_error::Error;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single endpoint: a canonical 128-bit address and the UUID of the
/// network (sensor) it was observed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub addr: Ipv6Addr,
    pub nuid: Uuid,
}

impl Endpoint {
    #[must_use]
    pub fn new(addr: Ipv6Addr, nuid: Uuid) -> Self {
        Self { addr, nuid }
    }
}

/// Canonicalize an IPv4 address to its IPv4-mapped IPv6 form
/// (`::ffff:a.b.c.d`), matching the data model's "128-bit canonical form"
/// requirement.
#[must_use]
pub fn canonicalize_ipv4(addr: Ipv4Addr) -> Ipv6Addr {
    addr.to_ipv6_mapped()
}

/// Canonicalize any parsed `IpAddr` to the 128-bit form used throughout
/// the data model.
#[must_use]
pub fn canonicalize(addr: IpAddr) -> Ipv6Addr {
    match addr {
        IpAddr::V4(v4) => canonicalize_ipv4(v4),
        IpAddr::V6(v6) => v6,
    }
}

/// Parse a literal IP address (v4 or v6) into its canonical 128-bit form.
///
/// # Errors
/// Returns `Error::ParseCidrInvalidIp` if `literal` is not a valid IP
/// address literal.
pub fn parse_ip(literal: &str) -> Result<Ipv6Addr, Error> {
    IpAddr::from_str(literal)
        .map(canonicalize)
        .map_err(|_| Error::ParseCidrInvalidIp {
            cidr: literal.to_string(),
        })
}

/// Returns true if `addr` (already canonical) is the IPv4-mapped form of
/// `v4`.
#[must_use]
pub fn is_ipv4_mapped(addr: Ipv6Addr) -> bool {
    addr.to_ipv4_mapped().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_canonicalizes_to_mapped_ipv6() {
        let v4 = Ipv4Addr::new(10, 0, 0, 1);
        let mapped = canonicalize_ipv4(v4);
        assert!(is_ipv4_mapped(mapped));
        assert_eq!(mapped.to_ipv4_mapped(), Some(v4));
    }

    #[test]
    fn parse_ip_rejects_garbage() {
        assert!(parse_ip("not-an-ip").is_err());
    }

    #[test]
    fn parse_ip_accepts_v6_literal() {
        let addr = parse_ip("::1").unwrap();
        assert_eq!(addr, Ipv6Addr::LOCALHOST);
    }
}
