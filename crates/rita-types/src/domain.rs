//! Strict FQDN validation shared by config loading and threat-intel feed
//! parsing.

/// Validate `fqdn` per the strict rules: labels <= 63 bytes, total
/// <= 253 bytes, no consecutive dots, only letters/digits/hyphen/dot, no
/// leading/trailing dot or hyphen-per-label violations.
///
/// # Errors
/// Returns a `&'static str` reason suitable for wrapping in
/// `rita_error::Error::InvalidFqdn`.
pub fn validate_fqdn(fqdn: &str) -> Result<(), &'static str> {
    if fqdn.is_empty() {
        return Err("empty");
    }
    if fqdn.len() > 253 {
        return Err("total length exceeds 253 bytes");
    }
    if fqdn.contains("..") {
        return Err("contains consecutive dots");
    }
    if fqdn.starts_with('.') || fqdn.ends_with('.') {
        return Err("leading or trailing dot");
    }
    for label in fqdn.split('.') {
        if label.is_empty() {
            return Err("empty label");
        }
        if label.len() > 63 {
            return Err("label exceeds 63 bytes");
        }
        if label.starts_with('-') || label.ends_with('-') {
            return Err("label starts or ends with hyphen");
        }
        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err("label contains invalid characters");
        }
    }
    Ok(())
}

/// Strip a leading `*.` wildcard label before validating a config-supplied
/// domain, matching spec.md's "a leading `*.` is stripped before FQDN
/// validation for config domains" rule.
#[must_use]
pub fn strip_leading_wildcard(domain: &str) -> &str {
    domain.strip_prefix("*.").unwrap_or(domain)
}

/// Validate a config-supplied domain (after wildcard stripping).
pub fn validate_config_domain(domain: &str) -> Result<(), &'static str> {
    validate_fqdn(strip_leading_wildcard(domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_domain() {
        assert!(validate_fqdn("example.com").is_ok());
    }

    #[test]
    fn strips_wildcard_before_validating() {
        assert!(validate_config_domain("*.example.com").is_ok());
    }

    #[test]
    fn rejects_consecutive_dots() {
        assert!(validate_fqdn("example..com").is_err());
    }

    #[test]
    fn rejects_label_over_63_bytes() {
        let long_label = "a".repeat(64);
        let fqdn = format!("{long_label}.com");
        assert!(validate_fqdn(&fqdn).is_err());
    }

    #[test]
    fn rejects_total_over_253_bytes() {
        let label = "a".repeat(60);
        let fqdn = std::iter::repeat(label).take(5).collect::<Vec<_>>().join(".");
        assert!(fqdn.len() > 253);
        assert!(validate_fqdn(&fqdn).is_err());
    }

    #[test]
    fn rejects_invalid_characters() {
        assert!(validate_fqdn("exa_mple.com").is_err());
    }
}
