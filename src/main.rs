//! Graph Dashboard - Main Server
//!
//! Serves the knowledge graph dashboard, or runs a single query from the
//! command line and prints the result as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use graph_dashboard::explorer::{ExploreMode, ViewRequest};
use graph_dashboard::{AppState, Config};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Neo4j knowledge graph dashboard")]
struct Cli {
    /// Path to the YAML config file (defaults to ./config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the dashboard server
    Serve {
        /// Port to listen on (overrides config.yaml and SERVER_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print node counts per label
    Stats,

    /// Print the projection of a neighbor search
    Search {
        /// Substring matched against node names
        term: String,

        /// Node-count ceiling
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Print the projection of the shortest path between two named nodes
    Path {
        start: String,
        end: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,graph_dashboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let mut config = Config::from_yaml_and_env(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.server_port = port;
            }
            graph_dashboard::start_server(config).await
        }
        Commands::Stats => run_stats(config).await,
        Commands::Search { term, limit } => {
            let request = ViewRequest {
                mode: ExploreMode::Neighbors,
                full_graph: false,
                limit: limit.unwrap_or(config.default_limit),
                term: Some(term),
                ..Default::default()
            };
            run_view(config, request).await
        }
        Commands::Path { start, end } => {
            let request = ViewRequest {
                mode: ExploreMode::Path,
                start: Some(start),
                end: Some(end),
                ..Default::default()
            };
            run_view(config, request).await
        }
    }
}

async fn run_stats(config: Config) -> Result<()> {
    let state = AppState::new(config).await?;
    let outcome = state.explorer.label_histogram().await;
    tracing::debug!(status = ?outcome.status(), "Label histogram loaded");
    println!("{}", serde_json::to_string_pretty(&outcome.into_data())?);
    Ok(())
}

async fn run_view(config: Config, request: ViewRequest) -> Result<()> {
    let state = AppState::new(config).await?;
    let result = state.explorer.explore(&request).await;

    tracing::info!(
        status = ?result.status,
        nodes = result.projection.graph.node_count(),
        edges = result.projection.graph.edge_count(),
        "Query complete"
    );

    println!(
        "{}",
        serde_json::to_string_pretty(&result.projection.to_view())?
    );
    Ok(())
}
