//! Graph store — the on-disk JSON document and its load/save round-trip.
//!
//! The wire format is name-keyed:
//! ```text
//! { "nodes": { "<name>": {type, domain, definition?, description?, properties?} },
//!   "edges": [ {source, target, type} ] }
//! ```
//! Nodes live in a `BTreeMap` so serialization is deterministically keyed.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use esglink_core::types::{KnowledgeGraph, Node, NodeKind};

/// Errors that can occur during store operations.
///
/// Loading is infallible by design; only writes surface errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Audit log write failed at {path}: {source}")]
    Audit {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// A node as persisted, keyed externally by its display name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    #[serde(rename = "type")]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub properties: serde_json::Map<String, serde_json::Value>,
}

/// An edge as persisted: a directed name triple.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdgeRecord {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relation: String,
}

/// The whole persisted graph. Replaced wholesale on every save.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: BTreeMap<String, NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

impl GraphDocument {
    /// Project an in-memory graph onto the wire format. Surrogate IDs are
    /// resolved back to display names; edge order is preserved.
    pub fn from_graph(graph: &KnowledgeGraph) -> Self {
        let mut nodes = BTreeMap::new();
        for node in graph.nodes() {
            nodes.insert(
                node.name.clone(),
                NodeRecord {
                    kind: node.kind.clone(),
                    domain: node.domain.clone(),
                    definition: node.definition.clone(),
                    description: node.description.clone(),
                    properties: node.properties.clone(),
                },
            );
        }

        let mut edges = Vec::with_capacity(graph.edge_count());
        for edge in graph.edges() {
            if let Some((source, target)) = graph.edge_endpoints(edge) {
                edges.push(EdgeRecord {
                    source: source.to_string(),
                    target: target.to_string(),
                    relation: edge.relation.clone(),
                });
            }
        }

        Self { nodes, edges }
    }

    /// Rebuild an in-memory graph, allocating fresh surrogate IDs.
    pub fn into_graph(self) -> KnowledgeGraph {
        let mut graph = KnowledgeGraph::new();
        for (name, record) in self.nodes {
            let mut node = Node::new(name, record.kind);
            node.domain = record.domain;
            node.definition = record.definition;
            node.description = record.description;
            node.properties = record.properties;
            graph.insert_node(node);
        }
        for edge in self.edges {
            graph.add_edge(&edge.source, &edge.target, &edge.relation);
        }
        graph
    }
}

/// File-backed graph store.
pub struct GraphStore {
    path: PathBuf,
}

impl GraphStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the graph. Never fails: a missing or unparsable file yields an
    /// empty graph so the presentation layer can render an empty state and
    /// prompt a rebuild.
    pub fn load(&self) -> KnowledgeGraph {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "Graph file not readable; starting empty");
                return KnowledgeGraph::new();
            }
        };

        match serde_json::from_str::<GraphDocument>(&raw) {
            Ok(doc) => doc.into_graph(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Graph file unparsable; starting empty");
                KnowledgeGraph::new()
            }
        }
    }

    /// Save the graph, creating parent directories as needed and
    /// unconditionally overwriting the destination. Write failures
    /// propagate: a lost write must be visible.
    pub fn save(&self, graph: &KnowledgeGraph) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let doc = GraphDocument::from_graph(graph);
        let json = serde_json::to_string_pretty(&doc)?;
        fs::write(&self.path, json)?;

        tracing::debug!(
            path = %self.path.display(),
            nodes = doc.nodes.len(),
            edges = doc.edges.len(),
            "Graph saved"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_returns_empty_graph() {
        let dir = tempfile::tempdir().unwrap();
        let store = GraphStore::new(dir.path().join("missing.json"));
        let graph = store.load();
        assert!(graph.is_empty());
    }

    #[test]
    fn load_corrupt_file_returns_empty_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged_graph.json");
        fs::write(&path, "{ not json").unwrap();

        let graph = GraphStore::new(&path).load();
        assert!(graph.is_empty());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kg_exports/nested/merged_graph.json");
        let mut graph = KnowledgeGraph::new();
        graph.insert_node(Node::new("Acme", NodeKind::Organization));

        GraphStore::new(&path).save(&graph).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn save_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("merged_graph.json");
        let store = GraphStore::new(&path);

        let mut first = KnowledgeGraph::new();
        first.insert_node(Node::new("Acme", NodeKind::Organization));
        store.save(&first).unwrap();

        let second = KnowledgeGraph::new();
        store.save(&second).unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn document_tolerates_missing_sections() {
        let doc: GraphDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.edges.is_empty());

        let graph = doc.into_graph();
        assert!(graph.is_empty());
    }

    #[test]
    fn wire_type_tag_is_named_type() {
        let mut graph = KnowledgeGraph::new();
        graph.insert_node(Node::new("Acme", NodeKind::Organization));
        graph.add_edge("Acme", "Climate Change", "reports_on");

        let doc = GraphDocument::from_graph(&graph);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.contains("\"type\":\"Organization\""));
        assert!(json.contains("\"type\":\"reports_on\""));
        assert!(!json.contains("\"relation\""));
        assert!(!json.contains("\"kind\""));
    }

    #[test]
    fn dangling_edges_survive_the_round_trip() {
        let mut graph = KnowledgeGraph::new();
        graph.insert_node(Node::new("Acme", NodeKind::Organization));
        graph.add_edge("Acme", "Ghost Topic", "mentions");

        let doc = GraphDocument::from_graph(&graph);
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.edges.len(), 1);
        assert_eq!(doc.edges[0].target, "Ghost Topic");

        let back = doc.clone().into_graph();
        assert_eq!(GraphDocument::from_graph(&back), doc);
    }
}
