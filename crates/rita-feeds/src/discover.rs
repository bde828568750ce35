//! Builds the desired-state map for the reconciliation algorithm (§4.6
//! step 1): online feeds start with a zero modification time; custom
//! feeds are found by a non-recursive walk of `custom_feeds_directory`
//! for `.txt` candidates. Walk errors are collected, not fatal; a
//! missing or empty directory is not an error at all.

use std::collections::BTreeMap;

use rita_types::timestamp::{TimestampUs, ZERO};

#[derive(Debug, Clone, PartialEq)]
pub struct DesiredFeed {
    pub path: String,
    pub online: bool,
    pub last_modified_on_disk: TimestampUs,
}

/// `desired[path] -> DesiredFeed`, plus any non-fatal walk errors
/// encountered while scanning `custom_feeds_directory`.
#[must_use]
pub fn build_desired(online_feeds: &[String], custom_feeds_directory: Option<&str>) -> (BTreeMap<String, DesiredFeed>, Vec<String>) {
    let mut desired = BTreeMap::new();
    for url in online_feeds {
        desired.insert(
            url.clone(),
            DesiredFeed {
                path: url.clone(),
                online: true,
                last_modified_on_disk: ZERO,
            },
        );
    }

    let mut errors = Vec::new();
    if let Some(dir) = custom_feeds_directory {
        let (found, walk_errors) = walk_custom_feeds(dir);
        errors.extend(walk_errors);
        for feed in found {
            desired.insert(feed.path.clone(), feed);
        }
    }

    (desired, errors)
}

fn walk_custom_feeds(dir: &str) -> (Vec<DesiredFeed>, Vec<String>) {
    let mut feeds = Vec::new();
    let mut errors = Vec::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return (feeds, errors),
        Err(e) => {
            errors.push(format!("reading directory {dir:?}: {e}"));
            return (feeds, errors);
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                errors.push(format!("reading an entry of {dir:?}: {e}"));
                continue;
            }
        };
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            continue;
        }
        let modified = match entry.metadata().and_then(|m| m.modified()) {
            Ok(m) => m,
            Err(e) => {
                errors.push(format!("reading metadata for {}: {e}", path.display()));
                continue;
            }
        };
        feeds.push(DesiredFeed {
            path: path.to_string_lossy().into_owned(),
            online: false,
            last_modified_on_disk: TimestampUs::from_system_time(modified),
        });
    }

    (feeds, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_not_an_error() {
        let (desired, errors) = build_desired(&[], Some("/does/not/exist/at/all"));
        assert!(desired.is_empty());
        assert!(errors.is_empty());
    }

    #[test]
    fn online_feeds_start_with_zero_modification_time() {
        let (desired, _) = build_desired(&["https://example.com/feed.txt".to_string()], None);
        let feed = &desired["https://example.com/feed.txt"];
        assert!(feed.online);
        assert!(feed.last_modified_on_disk.is_zero());
    }

    #[test]
    fn custom_directory_only_picks_up_txt_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("feed.txt"), "1.2.3.4\n").unwrap();
        std::fs::write(dir.path().join("readme.md"), "not a feed\n").unwrap();
        let (desired, errors) = build_desired(&[], Some(dir.path().to_str().unwrap()));
        assert!(errors.is_empty());
        assert_eq!(desired.len(), 1);
        let (_, feed) = desired.iter().next().unwrap();
        assert!(!feed.online);
        assert!(feed.path.ends_with("feed.txt"));
    }
}
