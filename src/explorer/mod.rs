//! Query layer between the HTTP shell and the graph store.
//!
//! Read operations never fail: a store error is logged once here and turned
//! into [`ReadOutcome::Unavailable`], which the shell renders the same way as
//! [`ReadOutcome::Empty`]. Write operations report failures as a
//! [`WriteOutcome`] carrying a message for the user.

use crate::graph::{project, Projection};
use crate::neo4j::models::{LabelCount, QueryRecord};
use crate::neo4j::schema::{NodeLabel, RelationshipType};
use crate::neo4j::GraphStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Lower bound of the node-count ceiling
pub const MIN_NODE_LIMIT: usize = 20;
/// Upper bound of the node-count ceiling
pub const MAX_NODE_LIMIT: usize = 1000;
/// Node-count ceiling when none is given
pub const DEFAULT_NODE_LIMIT: usize = 300;
/// Cap on the names offered by selection widgets
pub const NODE_NAME_LIMIT: usize = 2000;

/// Clamp a requested ceiling into `[MIN_NODE_LIMIT, MAX_NODE_LIMIT]`
pub fn clamp_limit(limit: usize) -> usize {
    limit.clamp(MIN_NODE_LIMIT, MAX_NODE_LIMIT)
}

// ============================================================================
// Outcomes
// ============================================================================

/// Result of a read query.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// The query matched something
    Found(T),
    /// The query ran and matched nothing
    Empty,
    /// The store failed; treated as "no data" by the shell
    Unavailable { reason: String },
}

/// Serializable tag of a [`ReadOutcome`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    Found,
    Empty,
    Unavailable,
}

impl<T> ReadOutcome<T> {
    pub fn status(&self) -> ReadStatus {
        match self {
            Self::Found(_) => ReadStatus::Found,
            Self::Empty => ReadStatus::Empty,
            Self::Unavailable { .. } => ReadStatus::Unavailable,
        }
    }
}

impl<T: Default> ReadOutcome<T> {
    /// The data, or an empty value for `Empty` / `Unavailable`
    pub fn into_data(self) -> T {
        match self {
            Self::Found(data) => data,
            _ => T::default(),
        }
    }
}

impl<T> ReadOutcome<Vec<T>> {
    fn from_result(operation: &str, result: anyhow::Result<Vec<T>>) -> Self {
        match result {
            Ok(items) if items.is_empty() => Self::Empty,
            Ok(items) => Self::Found(items),
            Err(e) => {
                tracing::warn!(operation, error = %e, "Graph store query failed");
                Self::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

/// Result of a write operation, shown to the user once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteOutcome {
    pub success: bool,
    pub message: String,
}

impl WriteOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

// ============================================================================
// View requests
// ============================================================================

/// Exploration mode selected in the sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExploreMode {
    #[default]
    Neighbors,
    Path,
}

/// Everything the sidebar controls decide about which query to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRequest {
    pub mode: ExploreMode,
    /// Neighbors mode: sample the whole graph instead of searching
    pub full_graph: bool,
    pub term: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: usize,
}

impl Default for ViewRequest {
    fn default() -> Self {
        Self {
            mode: ExploreMode::Neighbors,
            full_graph: true,
            term: None,
            start: None,
            end: None,
            limit: DEFAULT_NODE_LIMIT,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Records plus their projection for one render pass
#[derive(Debug, Clone)]
pub struct ExploreResult {
    pub status: ReadStatus,
    pub projection: Projection,
}

// ============================================================================
// GraphExplorer
// ============================================================================

/// Query layer over a shared [`GraphStore`] handle.
#[derive(Clone)]
pub struct GraphExplorer {
    store: Arc<dyn GraphStore>,
}

impl GraphExplorer {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Nodes whose name contains `term`, with their neighbors
    pub async fn search_neighbors(&self, term: &str, limit: usize) -> ReadOutcome<Vec<QueryRecord>> {
        let result = self.store.search_neighbors(term, clamp_limit(limit)).await;
        ReadOutcome::from_result("search_neighbors", result)
    }

    /// A sample of the whole graph
    pub async fn full_graph(&self, limit: usize) -> ReadOutcome<Vec<QueryRecord>> {
        let result = self.store.sample_graph(clamp_limit(limit)).await;
        ReadOutcome::from_result("full_graph", result)
    }

    /// Records along the shortest path between two named nodes
    pub async fn shortest_path(&self, start: &str, end: &str) -> ReadOutcome<Vec<QueryRecord>> {
        // Neo4j rejects shortestPath with identical endpoints
        if start == end {
            return ReadOutcome::Empty;
        }
        let result = self.store.shortest_path(start, end).await;
        ReadOutcome::from_result("shortest_path", result)
    }

    /// Node counts per label, largest first
    pub async fn label_histogram(&self) -> ReadOutcome<Vec<LabelCount>> {
        let result = self.store.label_histogram().await;
        ReadOutcome::from_result("label_histogram", result)
    }

    /// Sorted names for selection widgets
    pub async fn list_all_node_names(&self) -> ReadOutcome<Vec<String>> {
        let result = self.store.list_node_names(NODE_NAME_LIMIT).await;
        ReadOutcome::from_result("list_all_node_names", result)
    }

    /// Pick the query the controls ask for. `Empty` when the controls are
    /// incomplete (no search term, missing path endpoint).
    pub async fn load_records(&self, request: &ViewRequest) -> ReadOutcome<Vec<QueryRecord>> {
        match request.mode {
            ExploreMode::Neighbors if request.full_graph => self.full_graph(request.limit).await,
            // The term is matched as entered; whitespace is a valid search
            ExploreMode::Neighbors => match request.term.as_deref() {
                Some(term) if !term.is_empty() => {
                    self.search_neighbors(term, request.limit).await
                }
                _ => ReadOutcome::Empty,
            },
            ExploreMode::Path => match (non_empty(&request.start), non_empty(&request.end)) {
                (Some(start), Some(end)) => self.shortest_path(start, end).await,
                _ => ReadOutcome::Empty,
            },
        }
    }

    /// One full render pass: query, then project
    pub async fn explore(&self, request: &ViewRequest) -> ExploreResult {
        let outcome = self.load_records(request).await;
        let status = outcome.status();
        let records = outcome.into_data();
        let projection = project(&records);
        tracing::debug!(
            mode = ?request.mode,
            records = records.len(),
            nodes = projection.graph.node_count(),
            edges = projection.graph.edge_count(),
            "Projected view"
        );
        ExploreResult { status, projection }
    }

    /// Create a node unless one with the same label and name exists
    pub async fn upsert_node(&self, label: NodeLabel, name: &str) -> WriteOutcome {
        let name = name.trim();
        if name.is_empty() {
            return WriteOutcome::failed("Please enter a node name");
        }
        match self.store.merge_node(label, name).await {
            Ok(()) => WriteOutcome::ok(format!("Node '{}' ({}) saved", name, label)),
            Err(e) => {
                tracing::warn!(%label, name, error = %e, "Failed to save node");
                WriteOutcome::failed(format!("System error: {}", e))
            }
        }
    }

    /// Link two existing nodes unless an identical relationship exists
    pub async fn upsert_relationship(
        &self,
        start: &str,
        end: &str,
        rel_type: RelationshipType,
    ) -> WriteOutcome {
        let (start, end) = (start.trim(), end.trim());
        if start.is_empty() || end.is_empty() || start == end {
            return WriteOutcome::failed("Please select two different nodes");
        }
        match self.store.merge_relationship(start, end, rel_type).await {
            Ok(true) => WriteOutcome::ok(format!("Linked: {} -> {}", start, end)),
            Ok(false) => WriteOutcome::failed("Link failed: node not found"),
            Err(e) => {
                tracing::warn!(start, end, %rel_type, error = %e, "Failed to link nodes");
                WriteOutcome::failed(format!("System error: {}", e))
            }
        }
    }
}
