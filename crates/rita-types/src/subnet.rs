//! Subnets: a (prefix, prefix-length) pair over the same 128-bit canonical
//! address space as [`crate::endpoint::Endpoint`].

use std::net::Ipv6Addr;
use std::str::FromStr;

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use rita_error::Error;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::endpoint::canonicalize_ipv4;

/// A canonical CIDR block: a 128-bit prefix plus its prefix length.
///
/// IPv4 blocks are represented with a prefix length offset by 96 (i.e. a
/// `/24` IPv4 block becomes a `/120` over the mapped address), so
/// membership tests never need to branch on address family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    pub prefix: Ipv6Addr,
    pub prefix_len: u8,
}

/// Subnets (de)serialize as their CIDR string (`"10.0.0.0/8"`), matching
/// the config file's human-edited representation, rather than as the
/// internal (prefix, prefix_len) pair.
impl Serialize for Subnet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_cidr_string())
    }
}

impl<'de> Deserialize<'de> for Subnet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let literal = String::deserialize(deserializer)?;
        parse_cidr(&literal).map_err(|e| D::Error::custom(e.to_string()))
    }
}

const V4_PREFIX_OFFSET: u8 = 96;

impl Subnet {
    #[must_use]
    pub fn new(prefix: Ipv6Addr, prefix_len: u8) -> Self {
        Self { prefix, prefix_len }
    }

    #[must_use]
    pub fn contains(&self, addr: Ipv6Addr) -> bool {
        let net = Ipv6Net::new(self.prefix, self.prefix_len)
            .map(|n| n.trunc())
            .unwrap_or(Ipv6Net::new(self.prefix, 128).unwrap());
        net.contains(&addr)
    }

    /// True if `other` is fully contained within `self`.
    #[must_use]
    pub fn contains_subnet(&self, other: &Subnet) -> bool {
        if other.prefix_len < self.prefix_len {
            return false;
        }
        self.contains(other.prefix)
    }

    /// Render back to a human-editable CIDR literal.
    #[must_use]
    pub fn to_cidr_string(&self) -> String {
        if self.prefix_len >= V4_PREFIX_OFFSET {
            if let Some(v4) = self.prefix.to_ipv4_mapped() {
                return format!("{v4}/{}", self.prefix_len - V4_PREFIX_OFFSET);
            }
        }
        format!("{}/{}", self.prefix, self.prefix_len)
    }
}

/// Parse a CIDR literal (`"10.0.0.0/8"`, `"fe80::/10"`, or a bare IP which
/// is treated as a host route) into its canonical [`Subnet`].
///
/// # Errors
/// Returns `Error::ParseCidrInvalidIp` if the address portion doesn't
/// parse, `Error::ParseCidrInvalidMask` if the prefix length is absent,
/// non-numeric, or out of range for the address family.
pub fn parse_cidr(literal: &str) -> Result<Subnet, Error> {
    let literal = literal.trim();
    if let Ok(net) = IpNet::from_str(literal) {
        return Ok(canonicalize_ipnet(net));
    }

    // Not parseable as a full CIDR; decide whether the fault is the IP or
    // the mask so callers get the distinguishable error spec.md requires.
    let (addr_part, mask_part) = match literal.split_once('/') {
        Some((a, m)) => (a, Some(m)),
        None => (literal, None),
    };

    match addr_part.parse::<std::net::IpAddr>() {
        Ok(addr) => {
            if mask_part.is_some() {
                Err(Error::ParseCidrInvalidMask {
                    cidr: literal.to_string(),
                })
            } else {
                // Bare IP: treat as a host route (/32 or /128).
                let canon = crate::endpoint::canonicalize(addr);
                let len = if addr.is_ipv4() {
                    V4_PREFIX_OFFSET + 32
                } else {
                    128
                };
                Ok(Subnet::new(canon, len))
            }
        }
        Err(_) => Err(Error::ParseCidrInvalidIp {
            cidr: literal.to_string(),
        }),
    }
}

fn canonicalize_ipnet(net: IpNet) -> Subnet {
    match net {
        IpNet::V4(v4) => {
            let trunc: Ipv4Net = v4.trunc();
            Subnet::new(
                canonicalize_ipv4(trunc.network()),
                V4_PREFIX_OFFSET + trunc.prefix_len(),
            )
        }
        IpNet::V6(v6) => {
            let trunc = v6.trunc();
            Subnet::new(trunc.network(), trunc.prefix_len())
        }
    }
}

/// Canonicalize and compact a list of subnets: coalesce any subnet that is
/// fully contained within another in the list.
#[must_use]
pub fn compact(subnets: &[Subnet]) -> Vec<Subnet> {
    let mut sorted = subnets.to_vec();
    sorted.sort_by_key(|s| s.prefix_len);
    let mut out: Vec<Subnet> = Vec::with_capacity(sorted.len());
    'outer: for candidate in sorted {
        for kept in &out {
            if kept.contains_subnet(&candidate) {
                continue 'outer;
            }
        }
        out.retain(|kept| !candidate.contains_subnet(kept));
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ipv4_cidr() {
        let s = parse_cidr("10.0.0.0/8").unwrap();
        assert_eq!(s.prefix_len, 96 + 8);
        assert!(s.contains(canonicalize_ipv4(std::net::Ipv4Addr::new(10, 1, 2, 3))));
        assert!(!s.contains(canonicalize_ipv4(std::net::Ipv4Addr::new(11, 1, 2, 3))));
    }

    #[test]
    fn parses_ipv6_cidr() {
        let s = parse_cidr("fe80::/10").unwrap();
        assert!(s.contains("fe80::1".parse().unwrap()));
    }

    #[test]
    fn invalid_ip_is_distinguished_from_invalid_mask() {
        assert!(matches!(
            parse_cidr("999.999.999.999/8"),
            Err(Error::ParseCidrInvalidIp { .. })
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/abc"),
            Err(Error::ParseCidrInvalidMask { .. })
        ));
        assert!(matches!(
            parse_cidr("10.0.0.0/99"),
            Err(Error::ParseCidrInvalidMask { .. })
        ));
    }

    #[test]
    fn compact_coalesces_overlaps() {
        let a = parse_cidr("10.0.0.0/8").unwrap();
        let b = parse_cidr("10.1.0.0/16").unwrap();
        let c = parse_cidr("192.168.0.0/16").unwrap();
        let compacted = compact(&[a, b, c]);
        assert_eq!(compacted.len(), 2);
        assert!(compacted.contains(&a));
        assert!(compacted.contains(&c));
    }
}
