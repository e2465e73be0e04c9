//! Append-only merge audit log.
//!
//! One plain-text line per merge: `<timestamp> | <old> -> <new>`.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::store::StoreError;

pub struct MergeLog {
    path: PathBuf,
}

impl MergeLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one audit line. Write failures propagate; callers decide
    /// whether the surrounding operation already took effect.
    pub fn append(&self, old: &str, new: &str) -> Result<(), StoreError> {
        let line = format!(
            "{} | {} -> {}\n",
            Utc::now().format("%Y-%m-%d %H:%M:%S"),
            old,
            new
        );

        self.write_line(&line).map_err(|source| StoreError::Audit {
            path: self.path.display().to_string(),
            source,
        })
    }

    /// Create the log file (and its parent directory) if absent, without
    /// writing anything. Lets fresh deployments start with an empty trail.
    pub fn ensure_exists(&self) -> Result<(), StoreError> {
        self.write_line("").map_err(|source| StoreError::Audit {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}
