//! Dense indexed view of a knowledge graph.
//!
//! Analysis algorithms want contiguous `usize` node indices and
//! adjacency lists rather than name lookups. The view covers every node
//! that exists structurally: declared nodes plus any endpoint that only
//! appears inside an edge. Index assignment is by sorted name, so the
//! same graph always produces the same view.

use std::collections::{BTreeSet, HashMap};

use esglink_core::types::{KnowledgeGraph, Node};

/// One directed arc in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc<'g> {
    pub peer: usize,
    pub relation: &'g str,
}

pub struct GraphView<'g> {
    graph: &'g KnowledgeGraph,
    names: Vec<&'g str>,
    index: HashMap<&'g str, usize>,
    outgoing: Vec<Vec<Arc<'g>>>,
    incoming: Vec<Vec<Arc<'g>>>,
    edge_count: usize,
}

impl<'g> GraphView<'g> {
    pub fn new(graph: &'g KnowledgeGraph) -> Self {
        let mut name_set: BTreeSet<&str> = graph.nodes().map(|n| n.name.as_str()).collect();
        for edge in graph.edges() {
            if let Some((source, target)) = graph.edge_endpoints(edge) {
                name_set.insert(source);
                name_set.insert(target);
            }
        }

        let names: Vec<&str> = name_set.into_iter().collect();
        let index: HashMap<&str, usize> =
            names.iter().enumerate().map(|(i, n)| (*n, i)).collect();

        let mut outgoing = vec![Vec::new(); names.len()];
        let mut incoming = vec![Vec::new(); names.len()];
        let mut edge_count = 0;
        for edge in graph.edges() {
            let Some((source, target)) = graph.edge_endpoints(edge) else {
                continue;
            };
            let (s, t) = (index[source], index[target]);
            outgoing[s].push(Arc { peer: t, relation: &edge.relation });
            incoming[t].push(Arc { peer: s, relation: &edge.relation });
            edge_count += 1;
        }

        Self { graph, names, index, outgoing, incoming, edge_count }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn name(&self, idx: usize) -> &'g str {
        self.names[idx]
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Declared node metadata; `None` for endpoints that exist only
    /// inside edges.
    pub fn node(&self, idx: usize) -> Option<&'g Node> {
        self.graph.node(self.names[idx])
    }

    pub fn outgoing(&self, idx: usize) -> &[Arc<'g>] {
        &self.outgoing[idx]
    }

    pub fn incoming(&self, idx: usize) -> &[Arc<'g>] {
        &self.incoming[idx]
    }

    pub fn out_degree(&self, idx: usize) -> usize {
        self.outgoing[idx].len()
    }

    pub fn in_degree(&self, idx: usize) -> usize {
        self.incoming[idx].len()
    }

    /// Total degree: in plus out, self-loops counted twice.
    pub fn degree(&self, idx: usize) -> usize {
        self.out_degree(idx) + self.in_degree(idx)
    }

    /// Undirected neighborhood, duplicates preserved.
    pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        self.outgoing[idx]
            .iter()
            .chain(self.incoming[idx].iter())
            .map(|arc| arc.peer)
    }
}
