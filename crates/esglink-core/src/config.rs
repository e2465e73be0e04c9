//! Configuration for the ESGLink engine.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::EsgLinkError;

/// Top-level ESGLink configuration.
///
/// Loaded from `esglink.toml` `[esglink]` section or `ESGLINK__`
/// environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct EsgLinkConfig {
    /// Root directory holding the four source collections.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Path of the merged graph JSON document.
    #[serde(default = "default_graph_path")]
    pub graph_path: String,

    /// Path of the append-only merge audit log.
    #[serde(default = "default_merge_log_path")]
    pub merge_log_path: String,
}

impl EsgLinkConfig {
    pub fn companies_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("companies")
    }

    pub fn reports_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("reports")
    }

    pub fn news_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("news")
    }

    pub fn social_dir(&self) -> PathBuf {
        Path::new(&self.data_dir).join("social_media")
    }

    /// Load configuration from an optional file (by prefix) layered with
    /// environment variables. Falls back to defaults when neither is set.
    pub fn load(file_prefix: &str) -> Result<Self, EsgLinkError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("ESGLINK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| EsgLinkError::Config(e.to_string()))?;

        match cfg.get::<EsgLinkConfig>("esglink") {
            Ok(c) => Ok(c),
            Err(_) => Ok(EsgLinkConfig::default()),
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_graph_path() -> String {
    "data/kg_exports/merged_graph.json".to_string()
}

fn default_merge_log_path() -> String {
    "merge_log.txt".to_string()
}

impl Default for EsgLinkConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            graph_path: default_graph_path(),
            merge_log_path: default_merge_log_path(),
        }
    }
}
