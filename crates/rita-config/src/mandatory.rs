//! The mandatory never-include subnet list (§4.1/§4.6): always present
//! after a config load, regardless of what the user's document says.

use rita_types::Subnet;
use rita_types::subnet::parse_cidr;

const MANDATORY_CIDRS: &[&str] = &[
    "0.0.0.0/32",
    "127.0.0.0/8",
    "169.254.0.0/16",
    "224.0.0.0/4",
    "255.255.255.255/32",
    "::1/128",
    "::/128",
    "fe80::/10",
    "ff00::/8",
    "ff02::2/128",
];

/// Parse the mandatory subnet list. Panics only if one of the hard-coded
/// literals above is malformed, which would be a bug in this module, not
/// a user-triggerable condition.
#[must_use]
pub fn mandatory_subnets() -> Vec<Subnet> {
    MANDATORY_CIDRS
        .iter()
        .map(|literal| parse_cidr(literal).expect("mandatory CIDR literal must be valid"))
        .collect()
}

/// Union `user_never_included` with the mandatory list, then compact.
#[must_use]
pub fn union_with_mandatory(user_never_included: &[Subnet]) -> Vec<Subnet> {
    let mut all = mandatory_subnets();
    all.extend_from_slice(user_never_included);
    rita_types::subnet::compact(&all)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mandatory_list_parses() {
        assert_eq!(mandatory_subnets().len(), MANDATORY_CIDRS.len());
    }

    #[test]
    fn union_always_retains_mandatory_entries() {
        let combined = union_with_mandatory(&[]);
        let loopback = parse_cidr("127.5.5.5").unwrap();
        assert!(combined.iter().any(|s| s.contains_subnet(&loopback) || s.contains(loopback.prefix)));
    }
}
