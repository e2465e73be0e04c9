//! esglink-analyze: Structural analysis over the ESGLink knowledge graph.
//!
//! Builds a dense indexed view of the graph (including endpoints that
//! only exist as edge references), then computes degree rankings,
//! connected components, greedy-modularity communities, and ego or
//! attribute-filtered subgraphs for exploration.

pub mod community;
pub mod subgraph;
pub mod summary;
pub mod view;

pub use community::{component_count, greedy_modularity_communities};
pub use subgraph::{ego_subgraph, filtered_subgraph, NodeFilter};
pub use summary::StructuralSummary;
pub use view::GraphView;
