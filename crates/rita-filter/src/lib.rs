//! Subnet / domain traffic filter (§4.2): five admit/reject decisions,
//! each a straight precedence table over the loaded `FilterConfig`. None
//! of these procedures touch the store or the network; they're pure
//! functions over a config snapshot and a pair of endpoints, so the bulk
//! writer can call them per-record on the hot path.

use std::net::Ipv6Addr;

use rita_config::FilterConfig;
use rita_types::Subnet;

fn is_member(subnets: &[Subnet], addr: Ipv6Addr) -> bool {
    subnets.iter().any(|s| s.contains(addr))
}

fn is_internal(cfg: &FilterConfig, addr: Ipv6Addr) -> bool {
    is_member(&cfg.internal_subnets, addr)
}

/// Admit/reject a single IP by the always/never-include subnet lists.
/// Precedence: always-include wins outright; otherwise never-include
/// rejects; anything left over is admitted.
#[must_use]
pub fn filter_single_ip(cfg: &FilterConfig, addr: Ipv6Addr) -> bool {
    if is_member(&cfg.always_included_subnets, addr) {
        return true;
    }
    if is_member(&cfg.never_included_subnets, addr) {
        return false;
    }
    true
}

/// Same precedence as [`filter_single_ip`], over the domain lists instead
/// of subnets.
#[must_use]
pub fn filter_domain(cfg: &FilterConfig, fqdn: &str) -> bool {
    let fqdn = fqdn.to_ascii_lowercase();
    if cfg.always_included_domains.iter().any(|d| d.eq_ignore_ascii_case(&fqdn)) {
        return true;
    }
    if cfg.never_included_domains.iter().any(|d| d.eq_ignore_ascii_case(&fqdn)) {
        return false;
    }
    true
}

/// Admit/reject a connection-like pair of endpoints.
///
/// 1. Either side always-included admits outright.
/// 2. Either side never-included rejects outright.
/// 3. No internal subnets configured admits (nothing to classify against).
/// 4. Both internal, or both external, rejects (no cross-boundary signal).
/// 5. `filter_external_to_internal` rejects src-external/dst-internal.
/// 6. Otherwise admit.
#[must_use]
pub fn filter_conn_pair(cfg: &FilterConfig, src: Ipv6Addr, dst: Ipv6Addr) -> bool {
    if is_member(&cfg.always_included_subnets, src) || is_member(&cfg.always_included_subnets, dst)
    {
        return true;
    }
    if is_member(&cfg.never_included_subnets, src) || is_member(&cfg.never_included_subnets, dst) {
        return false;
    }
    if cfg.internal_subnets.is_empty() {
        return true;
    }
    let src_internal = is_internal(cfg, src);
    let dst_internal = is_internal(cfg, dst);
    if src_internal == dst_internal {
        return false;
    }
    if cfg.filter_external_to_internal && !src_internal && dst_internal {
        return false;
    }
    true
}

/// Identical to [`filter_conn_pair`] except rule 4 only rejects when
/// **both** endpoints are external — internal-to-internal DNS traffic is
/// kept, since an internal resolver used for C2 would otherwise be
/// filtered out before it can be scored.
#[must_use]
pub fn filter_dns_pair(cfg: &FilterConfig, src: Ipv6Addr, dst: Ipv6Addr) -> bool {
    if is_member(&cfg.always_included_subnets, src) || is_member(&cfg.always_included_subnets, dst)
    {
        return true;
    }
    if is_member(&cfg.never_included_subnets, src) || is_member(&cfg.never_included_subnets, dst) {
        return false;
    }
    if cfg.internal_subnets.is_empty() {
        return true;
    }
    let src_internal = is_internal(cfg, src);
    let dst_internal = is_internal(cfg, dst);
    if !src_internal && !dst_internal {
        return false;
    }
    if cfg.filter_external_to_internal && !src_internal && dst_internal {
        return false;
    }
    true
}

/// SNI pairs are rejected iff the client (`src`) is not internal.
#[must_use]
pub fn filter_sni_pair(cfg: &FilterConfig, src: Ipv6Addr) -> bool {
    is_internal(cfg, src)
}

/// Like [`filter_conn_pair`] but omits both the internal/internal rejection
/// of rule 4 and the external-to-internal rule, since proxy traffic must
/// survive (HTTP conversations routinely go internal-to-internal through a
/// proxy, and src-external/dst-internal is the normal shape of inbound
/// traffic to a reverse proxy).
#[must_use]
pub fn filter_http_conn_pair(cfg: &FilterConfig, src: Ipv6Addr, dst: Ipv6Addr) -> bool {
    if is_member(&cfg.always_included_subnets, src) || is_member(&cfg.always_included_subnets, dst)
    {
        return true;
    }
    if is_member(&cfg.never_included_subnets, src) || is_member(&cfg.never_included_subnets, dst) {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use rita_types::subnet::parse_cidr;

    fn cfg_with_internal(cidrs: &[&str]) -> FilterConfig {
        let mut cfg = FilterConfig {
            internal_subnets: Vec::new(),
            always_included_subnets: Vec::new(),
            never_included_subnets: Vec::new(),
            always_included_domains: Vec::new(),
            never_included_domains: Vec::new(),
            filter_external_to_internal: false,
        };
        cfg.internal_subnets = cidrs.iter().map(|c| parse_cidr(c).unwrap()).collect();
        cfg
    }

    fn ip(s: &str) -> Ipv6Addr {
        parse_cidr(s).unwrap().prefix
    }

    #[test]
    fn single_ip_precedence() {
        let mut cfg = cfg_with_internal(&[]);
        cfg.never_included_subnets = vec![parse_cidr("255.255.255.255/32").unwrap()];
        assert!(!filter_single_ip(&cfg, ip("255.255.255.255")));
        assert!(filter_single_ip(&cfg, ip("8.8.8.8")));
    }

    #[test]
    fn conn_pair_rejects_cross_boundary_without_flag() {
        let cfg = cfg_with_internal(&["11.0.0.0/8", "120.0.0.0/8"]);
        assert!(!filter_conn_pair(&cfg, ip("185.0.0.0"), ip("16.0.0.0")));
        assert!(!filter_conn_pair(&cfg, ip("11.0.0.0"), ip("120.0.0.0")));
    }

    #[test]
    fn conn_pair_rejects_external_to_internal_when_flagged() {
        let mut cfg = cfg_with_internal(&["11.0.0.0/8"]);
        cfg.filter_external_to_internal = true;
        assert!(!filter_conn_pair(&cfg, ip("180.0.0.0"), ip("11.0.0.0")));
    }

    #[test]
    fn dns_pair_keeps_internal_to_internal() {
        let cfg = cfg_with_internal(&["11.0.0.0/8", "120.0.0.0/8"]);
        assert!(filter_dns_pair(&cfg, ip("11.0.0.0"), ip("120.0.0.0")));
    }

    #[test]
    fn sni_pair_requires_internal_source() {
        let cfg = cfg_with_internal(&["11.0.0.0/8"]);
        assert!(filter_sni_pair(&cfg, ip("11.0.0.1")));
        assert!(!filter_sni_pair(&cfg, ip("8.8.8.8")));
    }

    #[test]
    fn http_conn_pair_survives_internal_to_internal() {
        let cfg = cfg_with_internal(&["11.0.0.0/8"]);
        assert!(filter_http_conn_pair(&cfg, ip("11.0.0.1"), ip("11.0.0.2")));
    }

    #[test]
    fn conn_pair_symmetric_when_external_to_internal_disabled() {
        let cfg = cfg_with_internal(&["11.0.0.0/8"]);
        let a = ip("11.0.0.1");
        let b = ip("8.8.8.8");
        assert_eq!(filter_conn_pair(&cfg, a, b), filter_conn_pair(&cfg, b, a));
    }
}
