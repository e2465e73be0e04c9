//! esglink-ingest: Source loading and graph construction for ESGLink.
//!
//! Reads the four JSON source collections (companies, reports, news,
//! social media), normalizes free-text identifiers for file matching, and
//! assembles everything into a single typed `KnowledgeGraph`. Also carries
//! the dashboard-facing sentiment and topic rollups.

pub mod aggregate;
pub mod builder;
pub mod loader;
pub mod normalize;
pub mod records;

pub use builder::build_graph;
pub use loader::SourceCollections;
pub use normalize::{detect_files_for_company, normalize};
