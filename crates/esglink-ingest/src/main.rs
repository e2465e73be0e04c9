//! CLI entry point for the ESGLink ingestion pipeline.

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use esglink_core::config::EsgLinkConfig;
use esglink_store::{GraphStore, MergeLog};

use esglink_ingest::aggregate::{news_sentiment, social_sentiment, topic_counts};
use esglink_ingest::builder::build_graph;
use esglink_ingest::loader::SourceCollections;
use esglink_ingest::normalize::detect_files_for_company;

#[derive(Parser)]
#[command(name = "esglink-ingest")]
#[command(about = "Source ingestion and graph construction for ESGLink")]
struct Cli {
    /// Config file prefix (default: esglink).
    #[arg(short, long, default_value = "esglink")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rebuild the knowledge graph from the source collections and save it.
    Rebuild,

    /// Print sentiment and topic rollups across the loaded collections.
    Stats,

    /// List candidate source files matching a company name or ID.
    Detect {
        /// Registered company name.
        #[arg(long, default_value = "")]
        name: String,

        /// Internal company identifier.
        #[arg(long, default_value = "")]
        id: String,
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

    match cli.command {
        Command::Rebuild => rebuild(&config),
        Command::Stats => stats(&config),
        Command::Detect { name, id } => detect(&config, &name, &id),
    }
}

fn rebuild(config: &EsgLinkConfig) -> anyhow::Result<()> {
    let sources = SourceCollections::load(config);
    let graph = build_graph(&sources);

    let store = GraphStore::new(&config.graph_path);
    store.save(&graph)?;
    // Touch the log so a fresh deployment starts with an empty audit trail
    // in a known location rather than no file at all.
    MergeLog::new(&config.merge_log_path).ensure_exists()?;

    let summary = serde_json::json!({
        "nodes": graph.node_count(),
        "edges": graph.edge_count(),
        "graph_path": config.graph_path,
        "sources": {
            "companies": sources.companies.len(),
            "reports": sources.reports.len(),
            "news": sources.news.len(),
            "social": sources.social.len(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn stats(config: &EsgLinkConfig) -> anyhow::Result<()> {
    let sources = SourceCollections::load(config);

    let rollups = serde_json::json!({
        "news_sentiment": news_sentiment(&sources),
        "social_sentiment": social_sentiment(&sources),
        "topics": topic_counts(&sources),
    });
    println!("{}", serde_json::to_string_pretty(&rollups)?);
    Ok(())
}

fn detect(config: &EsgLinkConfig, name: &str, id: &str) -> anyhow::Result<()> {
    if name.is_empty() && id.is_empty() {
        anyhow::bail!("Specify --name and/or --id to match against filenames");
    }
    let files = detect_files_for_company(name, id, config);
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}
