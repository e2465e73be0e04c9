//! Source loader — reads a directory of JSON documents per collection.
//!
//! Loading is lenient end to end: a missing directory is an empty
//! collection, and an unreadable or unparsable file keeps its slot with
//! `None` so consumers can tell "absent" from "broken".

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use esglink_core::config::EsgLinkConfig;

use crate::records::{CompanyRecord, NewsRecord, ReportRecord, SocialRecord};

/// Map of document filename → parsed record (`None` for corrupt files).
pub type Collection<T> = BTreeMap<String, Option<T>>;

/// All four source collections, loaded and typed.
#[derive(Debug, Clone, Default)]
pub struct SourceCollections {
    pub companies: Collection<CompanyRecord>,
    pub reports: Collection<ReportRecord>,
    pub news: Collection<NewsRecord>,
    pub social: Collection<SocialRecord>,
}

impl SourceCollections {
    pub fn load(config: &EsgLinkConfig) -> Self {
        Self {
            companies: load_collection(&config.companies_dir()),
            reports: load_collection(&config.reports_dir()),
            news: load_collection(&config.news_dir()),
            social: load_collection(&config.social_dir()),
        }
    }
}

/// Load every `*.json` file in a directory.
pub fn load_collection<T: DeserializeOwned>(dir: &Path) -> Collection<T> {
    let mut out = BTreeMap::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Collection directory not readable");
            return out;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        let parsed = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<T>(&raw) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "Unparsable record kept as null");
                    None
                }
            },
            Err(e) => {
                tracing::warn!(file = %name, error = %e, "Unreadable record kept as null");
                None
            }
        };

        out.insert(name, parsed);
    }

    out
}

/// Names of the `*.json` files in a directory, sorted.
pub fn list_json_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                return None;
            }
            path.file_name().and_then(|n| n.to_str()).map(str::to_string)
        })
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn missing_directory_is_an_empty_collection() {
        let loaded: Collection<CompanyRecord> =
            load_collection(Path::new("/nonexistent/esglink-companies"));
        assert!(loaded.is_empty());
    }

    #[test]
    fn corrupt_files_keep_their_slot_as_null() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "acme.json", r#"{ "name": "Acme" }"#);
        write(dir.path(), "broken.json", "{ nope");
        write(dir.path(), "notes.txt", "not a record");

        let loaded: Collection<CompanyRecord> = load_collection(dir.path());
        assert_eq!(loaded.len(), 2);
        assert!(loaded["acme.json"].is_some());
        assert!(loaded["broken.json"].is_none());
        assert!(!loaded.contains_key("notes.txt"));
    }

    #[test]
    fn list_json_files_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "b.json", "{}");
        write(dir.path(), "a.json", "{}");
        write(dir.path(), "c.csv", "x");

        assert_eq!(list_json_files(dir.path()), vec!["a.json", "b.json"]);
    }

    #[test]
    fn load_all_collections_from_config_layout() {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["companies", "reports", "news", "social_media"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        write(
            &dir.path().join("companies"),
            "acme.json",
            r#"{ "name": "Acme" }"#,
        );

        let config = EsgLinkConfig {
            data_dir: dir.path().display().to_string(),
            ..Default::default()
        };
        let sources = SourceCollections::load(&config);
        assert_eq!(sources.companies.len(), 1);
        assert!(sources.reports.is_empty());
        assert!(sources.news.is_empty());
        assert!(sources.social.is_empty());
    }
}
