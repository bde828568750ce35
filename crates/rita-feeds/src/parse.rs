//! Feed line parsing (§4.6): blanks and comment lines are skipped; a
//! surviving line is tried as an IP address, then as a strict FQDN with a
//! leading `*.` wildcard stripped first.

use rita_types::endpoint::parse_ip;
use rita_types::fingerprint::Fingerprint;
use rita_types::feed::FeedEntry;
use rita_types::domain::validate_config_domain;

fn is_comment_or_blank(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") || trimmed.starts_with("<!--")
}

/// Parse one candidate line into a [`FeedEntry`], or `None` if the line is
/// blank/a comment. Lines that are neither a valid IP nor a valid FQDN are
/// dropped silently, matching spec.md's "failing that" fallthrough (the
/// caller may choose to log via the `Err` path if it wants visibility).
#[must_use]
pub fn parse_line(feed_fingerprint: Fingerprint, line: &str) -> Option<FeedEntry> {
    let trimmed = line.trim();
    if is_comment_or_blank(trimmed) {
        return None;
    }
    if let Ok(ip) = parse_ip(trimmed) {
        return Some(FeedEntry::ip(feed_fingerprint, ip));
    }
    let stripped = trimmed.strip_prefix("*.").unwrap_or(trimmed);
    if validate_config_domain(trimmed).is_ok() {
        return Some(FeedEntry::fqdn(feed_fingerprint, stripped.to_string()));
    }
    None
}

/// Parse every line of `content`, dropping blanks/comments/invalid
/// entries.
#[must_use]
pub fn parse_entries(feed_fingerprint: Fingerprint, content: &str) -> Vec<FeedEntry> {
    content.lines().filter_map(|line| parse_line(feed_fingerprint, line)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fp() -> Fingerprint {
        Fingerprint::from_feed_path("test")
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        assert!(parse_line(fp(), "").is_none());
        assert!(parse_line(fp(), "   ").is_none());
        assert!(parse_line(fp(), "# comment").is_none());
        assert!(parse_line(fp(), "// comment").is_none());
        assert!(parse_line(fp(), "<!-- comment -->").is_none());
    }

    #[test]
    fn parses_ip_line() {
        let entry = parse_line(fp(), "1.2.3.4").unwrap();
        assert!(entry.ip.is_some());
        assert!(entry.fqdn.is_none());
    }

    #[test]
    fn parses_fqdn_line() {
        let entry = parse_line(fp(), "evil.example.com").unwrap();
        assert!(entry.fqdn.is_some());
        assert!(entry.ip.is_none());
    }

    #[test]
    fn strips_leading_wildcard_before_storing() {
        let entry = parse_line(fp(), "*.evil.example.com").unwrap();
        assert_eq!(entry.fqdn.as_deref(), Some("evil.example.com"));
    }

    #[test]
    fn rejects_invalid_fqdn() {
        assert!(parse_line(fp(), "not a domain!!").is_none());
    }

    #[test]
    fn parse_entries_skips_invalid_lines_and_keeps_valid_ones() {
        let content = "# header\n\n1.2.3.4\nbad line here!!\nexample.com\n";
        let entries = parse_entries(fp(), content);
        assert_eq!(entries.len(), 2);
    }
}
