//! Structural summary: the numbers the exploration dashboard leads with.

use serde::Serialize;

use crate::community::{component_count, greedy_modularity_communities};
use crate::view::GraphView;

const TOP_DEGREE: usize = 20;
const TOP_DIRECTIONAL: usize = 10;
const MAX_COMMUNITIES: usize = 10;
const MAX_COMMUNITY_MEMBERS: usize = 10;

/// One node in a degree ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeEntry {
    pub node: String,
    pub value: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct StructuralSummary {
    pub nodes: usize,
    pub edges: usize,
    pub component_count: usize,
    /// Top nodes by total degree (in + out).
    pub top_degree: Vec<DegreeEntry>,
    pub top_in_degree: Vec<DegreeEntry>,
    pub top_out_degree: Vec<DegreeEntry>,
    /// Largest communities, truncated for display.
    pub communities: Vec<Vec<String>>,
}

impl StructuralSummary {
    pub fn compute(view: &GraphView<'_>) -> Self {
        let mut communities = greedy_modularity_communities(view);
        communities.truncate(MAX_COMMUNITIES);
        for community in &mut communities {
            community.truncate(MAX_COMMUNITY_MEMBERS);
        }

        Self {
            nodes: view.len(),
            edges: view.edge_count(),
            component_count: component_count(view),
            top_degree: ranking(view, TOP_DEGREE, |v, i| v.degree(i)),
            top_in_degree: ranking(view, TOP_DIRECTIONAL, |v, i| v.in_degree(i)),
            top_out_degree: ranking(view, TOP_DIRECTIONAL, |v, i| v.out_degree(i)),
            communities,
        }
    }
}

/// Top-k nodes under a degree measure, ties broken by name.
fn ranking(
    view: &GraphView<'_>,
    k: usize,
    measure: impl Fn(&GraphView<'_>, usize) -> usize,
) -> Vec<DegreeEntry> {
    let mut entries: Vec<DegreeEntry> = (0..view.len())
        .map(|i| DegreeEntry {
            node: view.name(i).to_string(),
            value: measure(view, i),
        })
        .collect();
    entries.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.node.cmp(&b.node)));
    entries.truncate(k);
    entries
}
