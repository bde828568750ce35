//! Hand-rolled CSV parsing for the extension/MIME-type list (§3
//! "HTTP-extensions-CSV path"). The format is two columns,
//! `extension,mime_type`, one pair per line; blank lines and lines
//! starting with `#` are skipped. No embedded commas or quoting is
//! expected in either column, so a full CSV crate is unwarranted for this
//! one small reference file.

use std::path::Path;

use rita_error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MimeTypeExtension {
    pub extension: String,
    pub mime_type: String,
}

/// Parse the CSV file at `path` into `(extension, mime_type)` pairs.
///
/// # Errors
/// Returns `Error::FileDoesNotExist` if `path` is missing, or
/// `Error::Io` for any other read failure.
pub fn load(path: &Path) -> Result<Vec<MimeTypeExtension>> {
    if !path.exists() {
        return Err(Error::FileDoesNotExist(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    Ok(parse(&content))
}

#[must_use]
pub fn parse(content: &str) -> Vec<MimeTypeExtension> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let mut parts = line.splitn(2, ',');
            let extension = parts.next()?.trim();
            let mime_type = parts.next()?.trim();
            if extension.is_empty() || mime_type.is_empty() {
                return None;
            }
            Some(MimeTypeExtension {
                extension: extension.trim_start_matches('.').to_ascii_lowercase(),
                mime_type: mime_type.to_ascii_lowercase(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_rows() {
        let rows = parse("pdf,application/pdf\nexe,application/x-msdownload\n");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].extension, "pdf");
        assert_eq!(rows[0].mime_type, "application/pdf");
    }

    #[test]
    fn skips_blank_lines_and_comments() {
        let rows = parse("# header\n\npdf,application/pdf\n");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn strips_leading_dot_and_lowercases() {
        let rows = parse(".PDF,Application/PDF\n");
        assert_eq!(rows[0].extension, "pdf");
        assert_eq!(rows[0].mime_type, "application/pdf");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load(Path::new("/does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, Error::FileDoesNotExist(_)));
    }
}
