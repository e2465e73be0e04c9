//! Merge engine — collapse a duplicate node into a canonical node.
//!
//! Property precedence is deliberately the duplicate's: when the two nodes
//! share a property key, the old node's value overwrites the canonical
//! one. Callers rely on this to pull identifiers gathered under a
//! misspelled name onto the surviving node.

use esglink_core::types::KnowledgeGraph;

use crate::audit::MergeLog;
use crate::store::StoreError;

pub struct MergeEngine {
    log: MergeLog,
}

impl MergeEngine {
    pub fn new(log_path: impl Into<std::path::PathBuf>) -> Self {
        Self {
            log: MergeLog::new(log_path),
        }
    }

    /// Merge node `old` into node `new`.
    ///
    /// Returns `Ok(false)` without touching the graph when either name has
    /// no node record (user-input validation, not an error). On success the
    /// duplicate's properties overlay the canonical node's, its domain
    /// backfills a missing one, every edge touching `old` is redirected to
    /// `new`, the `old` node is removed, and exact duplicate edge triples
    /// collapse to their first occurrence.
    ///
    /// The audit line is written last: an `Err` from the log means the
    /// in-memory merge has already been applied.
    pub fn merge(
        &self,
        graph: &mut KnowledgeGraph,
        old: &str,
        new: &str,
    ) -> Result<bool, StoreError> {
        if old == new {
            return Ok(false);
        }
        let Some(duplicate) = graph.node(old).cloned() else {
            return Ok(false);
        };
        let (Some(old_id), Some(new_id)) = (graph.id_of(old), graph.id_of(new)) else {
            return Ok(false);
        };

        {
            let Some(canonical) = graph.node_mut(new) else {
                return Ok(false);
            };
            for (key, value) in duplicate.properties {
                canonical.properties.insert(key, value);
            }
            if canonical.domain.is_none() && duplicate.domain.is_some() {
                canonical.domain = duplicate.domain;
            }
        }

        let redirected = graph.redirect_edges(&old_id, &new_id);
        graph.remove_node(old);
        let collapsed = graph.dedup_edges();

        tracing::info!(
            old,
            new,
            redirected,
            collapsed,
            "Merged duplicate node into canonical node"
        );

        self.log.append(old, new)?;
        Ok(true)
    }
}
