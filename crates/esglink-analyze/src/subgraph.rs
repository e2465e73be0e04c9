//! Subgraph extraction for focused exploration.
//!
//! Both extractors return a fresh `KnowledgeGraph` induced on a kept
//! name set: declared nodes keep their metadata, edge-only endpoints
//! stay edge-only, and an edge survives only when both endpoints are
//! kept.

use std::collections::{HashSet, VecDeque};

use esglink_core::types::{KnowledgeGraph, Node};

use crate::view::GraphView;

/// Nodes within `radius` undirected hops of `center`, plus the edges
/// among them. An unknown center yields an empty graph.
pub fn ego_subgraph(graph: &KnowledgeGraph, center: &str, radius: usize) -> KnowledgeGraph {
    let view = GraphView::new(graph);
    let Some(start) = view.index_of(center) else {
        tracing::debug!(center, "Ego center not in graph");
        return KnowledgeGraph::new();
    };

    let mut kept: HashSet<usize> = HashSet::from([start]);
    let mut frontier = VecDeque::from([(start, 0usize)]);
    while let Some((idx, depth)) = frontier.pop_front() {
        if depth == radius {
            continue;
        }
        for peer in view.neighbors(idx) {
            if kept.insert(peer) {
                frontier.push_back((peer, depth + 1));
            }
        }
    }

    let names: HashSet<&str> = kept.into_iter().map(|i| view.name(i)).collect();
    induce(graph, &names)
}

/// Attribute filter over declared node metadata.
#[derive(Debug, Clone, Default)]
pub struct NodeFilter {
    /// Case-insensitive substring of the node name or its definition.
    pub search: Option<String>,
    /// Exact domain match.
    pub domain: Option<String>,
}

impl NodeFilter {
    fn matches(&self, name: &str, node: Option<&Node>) -> bool {
        if let Some(needle) = &self.search {
            let needle = needle.to_lowercase();
            let name_hit = name.to_lowercase().contains(&needle);
            let definition_hit = node
                .and_then(|n| n.definition.as_deref())
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !name_hit && !definition_hit {
                return false;
            }
        }
        if let Some(wanted) = &self.domain {
            if node.and_then(|n| n.domain.as_deref()) != Some(wanted.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Subgraph induced on all nodes passing the filter. Edge-only endpoints
/// have no domain, so a domain filter always drops them; a pure search
/// filter can keep them.
pub fn filtered_subgraph(graph: &KnowledgeGraph, filter: &NodeFilter) -> KnowledgeGraph {
    let view = GraphView::new(graph);
    let names: HashSet<&str> = (0..view.len())
        .filter(|&i| filter.matches(view.name(i), view.node(i)))
        .map(|i| view.name(i))
        .collect();
    induce(graph, &names)
}

fn induce(graph: &KnowledgeGraph, names: &HashSet<&str>) -> KnowledgeGraph {
    let mut out = KnowledgeGraph::new();
    for node in graph.nodes() {
        if names.contains(node.name.as_str()) {
            out.insert_node(node.clone());
        }
    }
    for edge in graph.edges() {
        let Some((source, target)) = graph.edge_endpoints(edge) else {
            continue;
        };
        if names.contains(source) && names.contains(target) {
            out.add_edge(source, target, &edge.relation);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::tests::chain_graph;
    use esglink_core::types::{Node, NodeKind};

    fn line_graph() -> KnowledgeGraph {
        // a -> b -> c -> d
        let mut graph = KnowledgeGraph::new();
        for name in ["a", "b", "c", "d"] {
            graph.insert_node(Node::new(name, NodeKind::Other("line".into())));
        }
        graph.add_edge("a", "b", "next");
        graph.add_edge("b", "c", "next");
        graph.add_edge("c", "d", "next");
        graph
    }

    #[test]
    fn ego_radius_counts_undirected_hops() {
        let graph = line_graph();

        let ego = ego_subgraph(&graph, "b", 1);
        assert_eq!(ego.node_count(), 3); // a, b, c
        assert_eq!(ego.edge_count(), 2);
        assert!(ego.node("d").is_none());

        let wide = ego_subgraph(&graph, "b", 2);
        assert_eq!(wide.node_count(), 4);
        assert_eq!(wide.edge_count(), 3);
    }

    #[test]
    fn ego_radius_zero_is_just_the_center() {
        let graph = line_graph();
        let ego = ego_subgraph(&graph, "b", 0);
        assert_eq!(ego.node_count(), 1);
        assert_eq!(ego.edge_count(), 0);
    }

    #[test]
    fn unknown_center_yields_empty_graph() {
        let graph = line_graph();
        assert!(ego_subgraph(&graph, "nope", 3).is_empty());
    }

    #[test]
    fn ego_traverses_against_edge_direction() {
        let graph = chain_graph();
        // "article::a1" points at Acme; Acme's ego must reach it anyway.
        let ego = ego_subgraph(&graph, "Acme", 1);
        assert!(ego.id_of("article::a1").is_some());
        assert_eq!(ego.node_count(), 3);
        assert_eq!(ego.edge_count(), 3);
    }

    #[test]
    fn search_filter_is_case_insensitive_substring() {
        let graph = chain_graph();
        let sub = filtered_subgraph(
            &graph,
            &NodeFilter {
                search: Some("cha".to_string()),
                domain: None,
            },
        );
        assert_eq!(sub.node_count(), 1);
        assert!(sub.node("Climate Change").is_some());
        assert_eq!(sub.edge_count(), 0);
    }

    #[test]
    fn search_matches_definitions_as_well_as_names() {
        let mut graph = chain_graph();
        graph.node_mut("Acme").unwrap().definition =
            Some("Industrial conglomerate".to_string());

        let sub = filtered_subgraph(
            &graph,
            &NodeFilter {
                search: Some("conglomerate".to_string()),
                domain: None,
            },
        );
        assert_eq!(sub.node_count(), 1);
        assert!(sub.node("Acme").is_some());
    }

    #[test]
    fn domain_filter_drops_edge_only_endpoints() {
        let mut graph = chain_graph();
        graph
            .node_mut("Climate Change")
            .unwrap()
            .domain = Some("Environment".to_string());
        graph.node_mut("Water Use").unwrap().domain = Some("Environment".to_string());

        let sub = filtered_subgraph(
            &graph,
            &NodeFilter {
                search: None,
                domain: Some("Environment".to_string()),
            },
        );
        assert_eq!(sub.node_count(), 2);
        assert!(sub.id_of("article::a1").is_none());
    }

    #[test]
    fn induced_edges_require_both_endpoints() {
        let graph = chain_graph();
        let sub = filtered_subgraph(
            &graph,
            &NodeFilter {
                search: Some("a".to_string()),
                domain: None,
            },
        );
        // Every name contains an "a", so the whole graph survives;
        // "article::a1" stays edge-only and is not a declared node.
        assert_eq!(sub.node_count(), 3);
        assert!(sub.id_of("article::a1").is_some());
        assert_eq!(sub.edge_count(), 3);
    }
}
