//! In-memory lookup table built from the parsed CSV, used by the
//! MIME/URI-mismatch modifier to decide whether an HTTP transaction's
//! observed MIME types match its URI's file extension.

use std::collections::{HashMap, HashSet};

use crate::csv::MimeTypeExtension;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    by_extension: HashMap<String, HashSet<String>>,
}

impl Registry {
    #[must_use]
    pub fn new(entries: &[MimeTypeExtension]) -> Self {
        let mut by_extension: HashMap<String, HashSet<String>> = HashMap::new();
        for entry in entries {
            by_extension.entry(entry.extension.clone()).or_default().insert(entry.mime_type.clone());
        }
        Self { by_extension }
    }

    #[must_use]
    pub fn expected_mime_types(&self, extension: &str) -> Option<&HashSet<String>> {
        self.by_extension.get(&extension.to_ascii_lowercase())
    }

    /// `true` iff `extension` is a known extension and none of
    /// `observed_mime_types` is among its expected MIME types. An unknown
    /// extension is never flagged as a mismatch — the registry has
    /// nothing to compare it against.
    #[must_use]
    pub fn is_mismatch(&self, extension: &str, observed_mime_types: &[String]) -> bool {
        let Some(expected) = self.expected_mime_types(extension) else {
            return false;
        };
        !observed_mime_types.iter().any(|m| expected.contains(&m.to_ascii_lowercase()))
    }
}

/// Extract the lowercase file extension from a URI's path component,
/// ignoring any query string or fragment.
#[must_use]
pub fn extension_from_uri(uri: &str) -> Option<String> {
    let path = uri.split(['?', '#']).next().unwrap_or(uri);
    let last_segment = path.rsplit('/').next()?;
    let (_, ext) = last_segment.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> Registry {
        Registry::new(&[
            MimeTypeExtension { extension: "pdf".into(), mime_type: "application/pdf".into() },
            MimeTypeExtension { extension: "exe".into(), mime_type: "application/x-msdownload".into() },
        ])
    }

    #[test]
    fn matching_mime_type_is_not_a_mismatch() {
        let reg = registry();
        assert!(!reg.is_mismatch("pdf", &["application/pdf".to_string()]));
    }

    #[test]
    fn wrong_mime_type_is_a_mismatch() {
        let reg = registry();
        assert!(reg.is_mismatch("pdf", &["application/x-msdownload".to_string()]));
    }

    #[test]
    fn unknown_extension_is_never_a_mismatch() {
        let reg = registry();
        assert!(!reg.is_mismatch("bin", &["application/octet-stream".to_string()]));
    }

    #[test]
    fn extracts_extension_ignoring_query_string() {
        assert_eq!(extension_from_uri("/downloads/report.PDF?token=abc"), Some("pdf".to_string()));
    }

    #[test]
    fn no_extension_returns_none() {
        assert_eq!(extension_from_uri("/downloads/report"), None);
    }
}
