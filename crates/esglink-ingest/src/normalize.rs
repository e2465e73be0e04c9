//! Identifier normalization and company↔file matching.
//!
//! File naming conventions are not rigid, so matching is deliberately
//! permissive: a company matches a file when its normalized name or ID is
//! a substring of the normalized filename. False positives on short
//! alphanumeric fragments are an accepted precision tradeoff.

use std::path::PathBuf;

use serde::Serialize;

use esglink_core::config::EsgLinkConfig;

use crate::loader::list_json_files;

/// Canonicalize free text into a comparable key: ASCII alphanumerics
/// only, lowercased. Two strings normalize-equal iff their projections
/// are equal.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Whether a normalized key matches a raw filename by substring
/// containment. Empty keys never match.
pub fn key_matches_file(key: &str, filename: &str) -> bool {
    !key.is_empty() && normalize(filename).contains(key)
}

/// Candidate source files for one company, grouped by collection.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyFiles {
    pub reports: Vec<PathBuf>,
    pub news: Vec<PathBuf>,
    pub social: Vec<PathBuf>,
}

/// Find candidate report/news/social files for a company by matching its
/// registered name and internal ID against filenames.
pub fn detect_files_for_company(
    company_name: &str,
    company_id: &str,
    config: &EsgLinkConfig,
) -> CompanyFiles {
    let name_key = normalize(company_name);
    let id_key = normalize(company_id);

    let matches = |filename: &str| {
        key_matches_file(&name_key, filename) || key_matches_file(&id_key, filename)
    };

    let collect = |dir: PathBuf| -> Vec<PathBuf> {
        list_json_files(&dir)
            .into_iter()
            .filter(|f| matches(f))
            .map(|f| dir.join(f))
            .collect()
    };

    CompanyFiles {
        reports: collect(config.reports_dir()),
        news: collect(config.news_dir()),
        social: collect(config.social_dir()),
    }
}
