//! CLI entry point for ESGLink graph analysis and maintenance.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use esglink_core::config::EsgLinkConfig;
use esglink_core::types::KnowledgeGraph;
use esglink_store::{GraphDocument, GraphStore, MergeEngine};

use esglink_analyze::subgraph::{ego_subgraph, filtered_subgraph, NodeFilter};
use esglink_analyze::summary::StructuralSummary;
use esglink_analyze::view::GraphView;

#[derive(Parser)]
#[command(name = "esglink-analyze")]
#[command(about = "Structural analysis and maintenance for the ESGLink graph")]
struct Cli {
    /// Config file prefix (default: esglink).
    #[arg(short, long, default_value = "esglink")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Degree rankings, component count, and communities.
    Summary,

    /// Neighborhood around one node.
    Ego {
        /// Name of the center node.
        center: String,

        /// Hop radius (undirected).
        #[arg(long, default_value_t = 1)]
        radius: usize,
    },

    /// Subgraph of nodes matching a search string and/or domain.
    Filter {
        /// Case-insensitive name substring.
        #[arg(long)]
        search: Option<String>,

        /// Exact domain match.
        #[arg(long)]
        domain: Option<String>,
    },

    /// Merge a duplicate node into a canonical one and save the result.
    Merge {
        /// Name of the duplicate node (removed).
        old: String,

        /// Name of the canonical node (kept).
        new: String,
    },
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = EsgLinkConfig::load(&cli.config)?;

    let store = GraphStore::new(&config.graph_path);
    let graph = store.load();
    if graph.is_empty() {
        tracing::warn!(path = %config.graph_path, "Graph is empty; run esglink-ingest rebuild first");
    }

    match cli.command {
        Command::Summary => {
            let view = GraphView::new(&graph);
            let summary = StructuralSummary::compute(&view);
            print_json(&summary)
        }
        Command::Ego { center, radius } => {
            print_subgraph(&ego_subgraph(&graph, &center, radius))
        }
        Command::Filter { search, domain } => {
            if search.is_none() && domain.is_none() {
                anyhow::bail!("Specify --search and/or --domain");
            }
            print_subgraph(&filtered_subgraph(&graph, &NodeFilter { search, domain }))
        }
        Command::Merge { old, new } => merge(&config, &store, graph, &old, &new),
    }
}

fn merge(
    config: &EsgLinkConfig,
    store: &GraphStore,
    mut graph: KnowledgeGraph,
    old: &str,
    new: &str,
) -> anyhow::Result<()> {
    let engine = MergeEngine::new(&config.merge_log_path);
    let merged = engine.merge(&mut graph, old, new)?;
    if !merged {
        anyhow::bail!("Cannot merge '{old}' into '{new}': check both nodes exist and differ");
    }
    store.save(&graph)?;

    print_json(&serde_json::json!({
        "merged": true,
        "removed": old,
        "kept": new,
        "nodes": graph.node_count(),
        "edges": graph.edge_count(),
    }))
}

fn print_subgraph(subgraph: &KnowledgeGraph) -> anyhow::Result<()> {
    print_json(&GraphDocument::from_graph(subgraph))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
