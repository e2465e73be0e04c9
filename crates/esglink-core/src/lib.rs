//! esglink-core: Shared types, configuration, and error handling for ESGLink.
//!
//! This crate provides the foundational pieces used across all ESGLink
//! components:
//! - The typed property graph (`KnowledgeGraph`, `Node`, `Edge`)
//! - Node kind tags (`Organization`, `ESGTopic`, `Metric`, ...)
//! - Configuration management
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::EsgLinkConfig;
pub use error::EsgLinkError;
pub use types::{Edge, KnowledgeGraph, Node, NodeId, NodeKind};
