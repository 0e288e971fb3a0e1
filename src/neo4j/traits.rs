//! GraphStore trait definition
//!
//! Abstract interface over the graph database. `Neo4jClient` is the production
//! implementation; tests use the in-memory `MockGraphStore`.

use crate::neo4j::models::{LabelCount, QueryRecord};
use crate::neo4j::schema::{NodeLabel, RelationshipType};
use anyhow::Result;
use async_trait::async_trait;

/// Abstract interface for all graph database operations.
///
/// Implementations return errors as-is; degrading read failures to "no data"
/// is the job of [`crate::explorer::GraphExplorer`].
#[async_trait]
pub trait GraphStore: Send + Sync {
    // ========================================================================
    // Read queries
    // ========================================================================

    /// Nodes whose `name` contains `term`, each with its neighbors (either
    /// direction). Matches without any relationship are returned as isolated
    /// records.
    async fn search_neighbors(&self, term: &str, limit: usize) -> Result<Vec<QueryRecord>>;

    /// Up to `limit` records of nodes and their outgoing relationships,
    /// including isolated nodes.
    async fn sample_graph(&self, limit: usize) -> Result<Vec<QueryRecord>>;

    /// Shortest path between the nodes named `start` and `end`, one record per
    /// edge in path order. Empty when there is no path.
    async fn shortest_path(&self, start: &str, end: &str) -> Result<Vec<QueryRecord>>;

    /// Node counts per first label, ordered by count descending
    async fn label_histogram(&self) -> Result<Vec<LabelCount>>;

    /// Sorted node names, at most `limit`
    async fn list_node_names(&self, limit: usize) -> Result<Vec<String>>;

    // ========================================================================
    // Writes
    // ========================================================================

    /// MERGE a node with the given label and name
    async fn merge_node(&self, label: NodeLabel, name: &str) -> Result<()>;

    /// MERGE a relationship between two existing nodes.
    ///
    /// Returns `false` (and writes nothing) when either endpoint is missing.
    async fn merge_relationship(
        &self,
        start: &str,
        end: &str,
        rel_type: RelationshipType,
    ) -> Result<bool>;

    // ========================================================================
    // Health
    // ========================================================================

    /// Check connectivity to the store
    async fn health_check(&self) -> Result<bool>;
}
