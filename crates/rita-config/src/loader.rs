//! The config load pipeline (§4.1):
//!
//! 1. Read the file, distinguishing "not found" from "empty" so operators
//!    get a specific diagnosis instead of a generic I/O error.
//! 2. Parse the comment-tolerant document on top of [`Config::defaults`],
//!    so a partial file only overrides the fields it mentions.
//! 3. Apply post-load derivations: the process environment always wins
//!    over the file for `env`, and the mandatory never-include subnets are
//!    unioned in regardless of what the file contains.
//! 4. Validate the result and fail closed on the first load.

use std::path::Path;

use rita_error::{Error, Result};

use crate::model::Config;
use crate::{env, mandatory, validator};

/// Load a config from `path`, applying the environment overlay and
/// mandatory-subnet union, then validating the result.
///
/// # Errors
/// Returns `Error::ConfigFileNotFound` / `Error::ConfigFileEmpty` if the
/// file can't be read as expected, `Error::ConfigParse` if the contents
/// aren't valid JSON5, or `Error::ConfigValidate` with every violation
/// found by [`validator::validate`] joined on one report.
pub fn load(path: &Path) -> Result<Config> {
    let raw = read_file(path)?;
    let mut cfg: Config = json5::from_str(&raw).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;

    cfg.env = env::apply(cfg.env);
    cfg.filtering.never_included_subnets =
        mandatory::union_with_mandatory(&cfg.filtering.never_included_subnets);

    let violations = validator::validate(&cfg);
    if !violations.is_empty() {
        return Err(Error::ConfigValidate(violations.join("\n")));
    }

    tracing::info!(path = %path.display(), "loaded config");
    Ok(cfg)
}

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(Error::ConfigFileNotFound(path.to_path_buf()));
    }
    let raw = std::fs::read_to_string(path)?;
    if raw.trim().is_empty() {
        return Err(Error::ConfigFileEmpty(path.to_path_buf()));
    }
    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn missing_file_is_distinguishable() {
        let err = load(Path::new("/nonexistent/path/rita.json5")).unwrap_err();
        assert!(matches!(err, Error::ConfigFileNotFound(_)));
    }

    #[test]
    fn empty_file_is_distinguishable() {
        let f = write_temp("   \n");
        let err = load(f.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigFileEmpty(_)));
    }

    #[test]
    fn partial_document_overlays_onto_defaults() {
        let f = write_temp(
            r#"{
                // comment-tolerant, per the json5 superset
                batch_size: 50000,
                filtering: { internal_subnets: ["10.0.0.0/8"] },
            }"#,
        );
        let cfg = load(f.path()).unwrap();
        assert_eq!(cfg.batch_size, 50_000);
        assert_eq!(cfg.max_query_execution_time, Config::defaults().max_query_execution_time);
        assert_eq!(cfg.filtering.internal_subnets.len(), 1);
    }

    #[test]
    fn mandatory_subnets_are_present_even_when_unlisted() {
        let f = write_temp(r#"{ filtering: { internal_subnets: ["10.0.0.0/8"] } }"#);
        let cfg = load(f.path()).unwrap();
        assert!(cfg.filtering.never_included_subnets.len() >= mandatory::mandatory_subnets().len());
    }

    #[test]
    fn invalid_document_reports_every_violation() {
        let f = write_temp(
            r#"{
                batch_size: 1,
                filtering: { internal_subnets: ["10.0.0.0/8"] },
                scoring: { beacon: { weights: { timestamp: 0.9 } } },
            }"#,
        );
        let err = load(f.path()).unwrap_err();
        match err {
            Error::ConfigValidate(report) => {
                assert!(report.contains("batch_size"));
                assert!(report.contains("sum to exactly 1.0"));
            }
            other => panic!("expected ConfigValidate, got {other:?}"),
        }
    }
}
