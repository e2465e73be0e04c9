//! esglink-store: Persistence and maintenance for the ESGLink knowledge graph.
//!
//! Defines the name-keyed JSON document format, the infallible
//! load / fallible save round-trip, and the merge engine that collapses
//! duplicate nodes with an append-only audit log.

pub mod audit;
pub mod merge;
pub mod store;

pub use audit::MergeLog;
pub use merge::MergeEngine;
pub use store::{EdgeRecord, GraphDocument, GraphStore, NodeRecord, StoreError};
