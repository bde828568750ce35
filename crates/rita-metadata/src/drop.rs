//! Dataset deletion (§4.5): drops a dataset's own schema and removes its
//! rows from `files`, `min_max`, and `sample_dbs` in the metadatabase.
//! Wildcard drop accepts a prefix-, suffix-, or both-wildcard pattern and
//! refuses to proceed when neither is present, so an operator can never
//! accidentally match every dataset with a bare name.

use rita_error::{Error, Result};
use rita_store::Session;

use crate::util::escape;
use crate::rows::DatasetRow;

/// Match `pattern` (which must carry a leading `*`, a trailing `*`, or
/// both) against `candidates`, returning every match.
///
/// # Errors
/// Returns `Error::InvalidDropPattern` if `pattern` has neither wildcard.
pub fn match_pattern(pattern: &str, candidates: &[String]) -> Result<Vec<String>> {
    let prefix_wildcard = pattern.starts_with('*');
    let suffix_wildcard = pattern.ends_with('*');
    if !prefix_wildcard && !suffix_wildcard {
        return Err(Error::InvalidDropPattern(pattern.to_string()));
    }

    let core = pattern
        .strip_prefix('*')
        .unwrap_or(pattern)
        .strip_suffix('*')
        .unwrap_or(pattern.strip_prefix('*').unwrap_or(pattern));

    let matches = |candidate: &str| -> bool {
        match (prefix_wildcard, suffix_wildcard) {
            (true, true) => candidate.contains(core),
            (true, false) => candidate.ends_with(core),
            (false, true) => candidate.starts_with(core),
            (false, false) => unreachable!("checked above"),
        }
    };

    Ok(candidates.iter().filter(|c| matches(c)).cloned().collect())
}

/// Every dataset name the metadatabase currently knows about, from
/// `sample_dbs`.
pub async fn known_datasets(session: &Session) -> Result<Vec<String>> {
    let rows: Vec<DatasetRow> = session
        .query("SELECT DISTINCT dataset FROM metadatabase.sample_dbs")
        .await?;
    Ok(rows.into_iter().map(|r| r.dataset).collect())
}

/// Drop `dataset`'s own schema (its database) and remove its rows from
/// `files`, `min_max`, and `sample_dbs`.
pub async fn drop_dataset(metadatabase: &Session, dataset: &str) -> Result<()> {
    let escaped = escape(dataset);
    metadatabase.execute(&format!("DROP DATABASE IF EXISTS {dataset}")).await?;
    metadatabase
        .execute(&format!("ALTER TABLE metadatabase.files DELETE WHERE dataset = '{escaped}'"))
        .await?;
    metadatabase
        .execute(&format!("ALTER TABLE metadatabase.min_max DELETE WHERE dataset = '{escaped}'"))
        .await?;
    metadatabase
        .execute(&format!("ALTER TABLE metadatabase.sample_dbs DELETE WHERE dataset = '{escaped}'"))
        .await?;
    tracing::info!(dataset, "dataset dropped");
    Ok(())
}

/// Resolve `pattern` against the known datasets and drop every match.
///
/// # Errors
/// Returns `Error::InvalidDropPattern` if `pattern` has neither wildcard.
pub async fn drop_matching(metadatabase: &Session, pattern: &str) -> Result<Vec<String>> {
    let known = known_datasets(metadatabase).await?;
    let matched = match_pattern(pattern, &known)?;
    for dataset in &matched {
        drop_dataset(metadatabase, dataset).await?;
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn rejects_pattern_without_any_wildcard() {
        assert!(match_pattern("acme", &names(&["acme"])).is_err());
    }

    #[test]
    fn prefix_wildcard_matches_suffix() {
        let candidates = names(&["acme-2024", "beta-2024", "acme-2023"]);
        let matched = match_pattern("*-2024", &candidates).unwrap();
        assert_eq!(matched, names(&["acme-2024", "beta-2024"]));
    }

    #[test]
    fn suffix_wildcard_matches_prefix() {
        let candidates = names(&["acme-2024", "acme-2023", "beta-2024"]);
        let matched = match_pattern("acme-*", &candidates).unwrap();
        assert_eq!(matched, names(&["acme-2024", "acme-2023"]));
    }

    #[test]
    fn both_wildcards_match_substring() {
        let candidates = names(&["acme-2024-rolling", "beta-2024", "acme-old"]);
        let matched = match_pattern("*2024*", &candidates).unwrap();
        assert_eq!(matched, names(&["acme-2024-rolling", "beta-2024"]));
    }
}
