//! Graph Dashboard
//!
//! An interactive dashboard over a Neo4j knowledge graph:
//! - Neighbor search, full-graph sampling and shortest paths, delegated to Cypher
//! - Projection of `(n, r, m)` records into a deduplicated node-link diagram
//!   and a relationship table
//! - Node and relationship maintenance restricted to a closed vocabulary
//! - HTTP API and HTML shell served with axum

pub mod api;
pub mod explorer;
pub mod graph;
pub mod neo4j;
pub mod preview;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

// ============================================================================
// YAML config structs (deserialization targets)
// ============================================================================

/// Top-level YAML configuration file structure
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: ServerYamlConfig,
    pub neo4j: Neo4jYamlConfig,
    pub view: ViewYamlConfig,
}

/// Server configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerYamlConfig {
    pub port: u16,
    /// Directory for per-render scratch files
    pub scratch_dir: String,
}

impl Default for ServerYamlConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            scratch_dir: "html_files".into(),
        }
    }
}

/// Neo4j configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Neo4jYamlConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for Neo4jYamlConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".into(),
            user: "neo4j".into(),
            password: "neo4j".into(),
        }
    }
}

/// Diagram defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewYamlConfig {
    /// Node-count ceiling when the request gives none
    pub default_limit: usize,
    pub physics: bool,
    /// Diagram height in pixels
    pub height: u32,
}

impl Default for ViewYamlConfig {
    fn default() -> Self {
        Self {
            default_limit: explorer::DEFAULT_NODE_LIMIT,
            physics: true,
            height: render::DEFAULT_HEIGHT,
        }
    }
}

// ============================================================================
// Runtime config (what the application actually uses)
// ============================================================================

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub neo4j_uri: String,
    pub neo4j_user: String,
    pub neo4j_password: String,
    pub server_port: u16,
    pub scratch_dir: PathBuf,
    pub default_limit: usize,
    pub physics: bool,
    pub height: u32,
}

impl Config {
    /// Load configuration from an optional YAML file, then override with env vars.
    ///
    /// Priority: env var > YAML > default
    ///
    /// If `yaml_path` is None, tries "config.yaml" in CWD. If the file doesn't
    /// exist, falls back to pure env var / defaults.
    pub fn from_yaml_and_env(yaml_path: Option<&Path>) -> Result<Self> {
        let yaml = Self::load_yaml(yaml_path);

        Ok(Self {
            neo4j_uri: std::env::var("NEO4J_URI").unwrap_or(yaml.neo4j.uri),
            neo4j_user: std::env::var("NEO4J_USER").unwrap_or(yaml.neo4j.user),
            neo4j_password: std::env::var("NEO4J_PASSWORD").unwrap_or(yaml.neo4j.password),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(yaml.server.port),
            scratch_dir: std::env::var("SCRATCH_DIR")
                .unwrap_or(yaml.server.scratch_dir)
                .into(),
            default_limit: explorer::clamp_limit(yaml.view.default_limit),
            physics: yaml.view.physics,
            height: yaml.view.height,
        })
    }

    /// Try to load and parse a YAML config file. Returns defaults on any failure.
    fn load_yaml(yaml_path: Option<&Path>) -> YamlConfig {
        let default_path = Path::new("config.yaml");
        let path = yaml_path.unwrap_or(default_path);

        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_yaml::from_str(&contents) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                    YamlConfig::default()
                }
            },
            Err(_) => {
                tracing::debug!(
                    "No config file at {}, using env vars / defaults",
                    path.display()
                );
                YamlConfig::default()
            }
        }
    }

    /// Diagram defaults from the `view` section
    pub fn render_options(&self) -> render::RenderOptions {
        render::RenderOptions {
            physics: self.physics,
            height: self.height,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub neo4j: Arc<dyn neo4j::GraphStore>,
    pub explorer: explorer::GraphExplorer,
    pub renderer: render::GraphRenderer,
    pub config: Arc<Config>,
}

impl AppState {
    /// Connect to Neo4j and build the state. Fails if the store is unreachable.
    pub async fn new(config: Config) -> Result<Self> {
        let neo4j = Arc::new(
            neo4j::client::Neo4jClient::new(
                &config.neo4j_uri,
                &config.neo4j_user,
                &config.neo4j_password,
            )
            .await?,
        );
        Ok(Self::with_store(neo4j, config))
    }

    /// Build the state around an existing store handle
    pub fn with_store(neo4j: Arc<dyn neo4j::GraphStore>, config: Config) -> Self {
        Self {
            explorer: explorer::GraphExplorer::new(neo4j.clone()),
            renderer: render::GraphRenderer::new(config.scratch_dir.clone()),
            neo4j,
            config: Arc::new(config),
        }
    }
}

/// Connect to Neo4j and serve the dashboard until the process is stopped.
pub async fn start_server(config: Config) -> Result<()> {
    let port = config.server_port;
    let state = AppState::new(config).await?;
    tracing::info!("Connected to Neo4j at {}", state.config.neo4j_uri);

    let app = api::create_router(state);
    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Dashboard listening on http://{}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
