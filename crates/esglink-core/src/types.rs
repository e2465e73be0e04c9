//! Core domain types for the ESGLink knowledge graph.
//!
//! Nodes carry surrogate `NodeId`s internally; display names remain the
//! public handle and the persistence key. The name→ID index lets the graph
//! detect name collisions (two records fighting over one display string)
//! instead of silently absorbing them.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

// ── Identifiers ───────────────────────────────────────────────────

/// Surrogate identifier for a node. Allocated on first sight of a display
/// name and never persisted; the on-disk format is name-keyed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NodeId(pub Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

// ── Node kinds ────────────────────────────────────────────────────

/// The entity class of a node.
///
/// The tag set is open-ended: unknown tags round-trip through `Other`
/// so new callers can introduce their own kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Organization,
    EsgTopic,
    Metric,
    NewsArticle,
    SocialPost,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Organization => "Organization",
            Self::EsgTopic => "ESGTopic",
            Self::Metric => "Metric",
            Self::NewsArticle => "NewsArticle",
            Self::SocialPost => "SocialPost",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for NodeKind {
    fn from(tag: &str) -> Self {
        match tag {
            "Organization" => Self::Organization,
            "ESGTopic" => Self::EsgTopic,
            "Metric" => Self::Metric,
            "NewsArticle" => Self::NewsArticle,
            "SocialPost" => Self::SocialPost,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// The tag is a bare string on the wire, so serde derives don't fit here.
impl Serialize for NodeKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NodeKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(NodeKind::from(tag.as_str()))
    }
}

// ── Nodes and edges ───────────────────────────────────────────────

/// A named entity in the knowledge graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    pub domain: Option<String>,
    pub definition: Option<String>,
    pub description: Option<String>,
    pub properties: serde_json::Map<String, serde_json::Value>,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            domain: None,
            definition: None,
            description: None,
            properties: serde_json::Map::new(),
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_definition(mut self, definition: impl Into<String>) -> Self {
        self.definition = Some(definition.into());
        self
    }

    pub fn with_properties(mut self, properties: serde_json::Map<String, serde_json::Value>) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_property(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.properties.insert(key.into(), value);
        self
    }
}

/// A directed, typed relation between two nodes.
///
/// Edges live in an ordered list, not an index: parallel edges between the
/// same pair with different relation labels are meaningful.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub relation: String,
}

// ── The graph ─────────────────────────────────────────────────────

/// The assembled property graph.
///
/// A plain owned value: mutating operations take `&mut self`, and the
/// store crate is the only place state crosses process lifetimes.
///
/// Edge endpoints may reference names with no node record ("dangling"
/// edges, tolerated by design); such names get a phantom `NodeId` so the
/// edge list stays well formed.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeGraph {
    nodes: HashMap<NodeId, Node>,
    name_index: HashMap<String, NodeId>,
    names: HashMap<NodeId, String>,
    edges: Vec<Edge>,
}

impl KnowledgeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a display name to its `NodeId`, allocating one if the name
    /// has never been seen. Interning alone does not create a node record.
    pub fn intern(&mut self, name: &str) -> NodeId {
        if let Some(id) = self.name_index.get(name) {
            return id.clone();
        }
        let id = NodeId::new();
        self.name_index.insert(name.to_string(), id.clone());
        self.names.insert(id.clone(), name.to_string());
        id
    }

    /// Insert a node. First write wins: re-inserting an existing name is a
    /// no-op, and a differing kind on re-insert is surfaced as a name
    /// collision rather than silently merged.
    pub fn insert_node(&mut self, node: Node) -> NodeId {
        let id = self.intern(&node.name);
        match self.nodes.entry(id.clone()) {
            Entry::Occupied(existing) => {
                if existing.get().kind != node.kind {
                    tracing::warn!(
                        name = %node.name,
                        existing_kind = %existing.get().kind,
                        incoming_kind = %node.kind,
                        "Name collision across node kinds; keeping first write"
                    );
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(node);
            }
        }
        id
    }

    /// Append a directed edge between two display names. Endpoints need
    /// not have node records yet (or ever).
    pub fn add_edge(&mut self, source: &str, target: &str, relation: &str) {
        let source = self.intern(source);
        let target = self.intern(target);
        self.edges.push(Edge {
            source,
            target,
            relation: relation.to_string(),
        });
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).cloned()
    }

    pub fn name_of(&self, id: &NodeId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.name_index.get(name).and_then(|id| self.nodes.get(id))
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        let id = self.name_index.get(name)?.clone();
        self.nodes.get_mut(&id)
    }

    /// Remove a node record. The name stays interned so existing edges
    /// referencing it remain resolvable (they become dangling).
    pub fn remove_node(&mut self, name: &str) -> Option<Node> {
        let id = self.name_index.get(name)?.clone();
        self.nodes.remove(&id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Resolve an edge's endpoints back to display names.
    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(&str, &str)> {
        Some((self.name_of(&edge.source)?, self.name_of(&edge.target)?))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Rewrite every edge endpoint equal to `from` to point at `to`.
    /// Returns the number of edges touched.
    pub fn redirect_edges(&mut self, from: &NodeId, to: &NodeId) -> usize {
        let mut touched = 0;
        for edge in &mut self.edges {
            let mut hit = false;
            if edge.source == *from {
                edge.source = to.clone();
                hit = true;
            }
            if edge.target == *from {
                edge.target = to.clone();
                hit = true;
            }
            if hit {
                touched += 1;
            }
        }
        touched
    }

    /// Collapse exact duplicate `(source, target, relation)` triples,
    /// keeping the first occurrence. Returns the number removed.
    pub fn dedup_edges(&mut self) -> usize {
        let before = self.edges.len();
        let mut seen: HashSet<(NodeId, NodeId, String)> = HashSet::with_capacity(before);
        self.edges
            .retain(|e| seen.insert((e.source.clone(), e.target.clone(), e.relation.clone())));
        before - self.edges.len()
    }
}
