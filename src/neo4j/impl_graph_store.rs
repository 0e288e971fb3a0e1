//! `GraphStore` implementation for `Neo4jClient`.
//!
//! Every method simply delegates to the corresponding inherent method on `Neo4jClient`.

use async_trait::async_trait;

use super::client::Neo4jClient;
use super::models::{LabelCount, QueryRecord};
use super::schema::{NodeLabel, RelationshipType};
use super::traits::GraphStore;

#[async_trait]
impl GraphStore for Neo4jClient {
    async fn search_neighbors(
        &self,
        term: &str,
        limit: usize,
    ) -> anyhow::Result<Vec<QueryRecord>> {
        self.search_neighbors(term, limit).await
    }

    async fn sample_graph(&self, limit: usize) -> anyhow::Result<Vec<QueryRecord>> {
        self.sample_graph(limit).await
    }

    async fn shortest_path(&self, start: &str, end: &str) -> anyhow::Result<Vec<QueryRecord>> {
        self.shortest_path(start, end).await
    }

    async fn label_histogram(&self) -> anyhow::Result<Vec<LabelCount>> {
        self.label_histogram().await
    }

    async fn list_node_names(&self, limit: usize) -> anyhow::Result<Vec<String>> {
        self.list_node_names(limit).await
    }

    async fn merge_node(&self, label: NodeLabel, name: &str) -> anyhow::Result<()> {
        self.merge_node(label, name).await
    }

    async fn merge_relationship(
        &self,
        start: &str,
        end: &str,
        rel_type: RelationshipType,
    ) -> anyhow::Result<bool> {
        self.merge_relationship(start, end, rel_type).await
    }

    async fn health_check(&self) -> anyhow::Result<bool> {
        self.health_check().await
    }
}
