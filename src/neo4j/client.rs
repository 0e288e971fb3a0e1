//! Neo4j client for the knowledge graph

use super::models::*;
use super::schema::{NodeLabel, RelationshipType};
use anyhow::{Context, Result};
use neo4rs::{query, BoltType, Graph, Query};
use std::sync::Arc;

/// Histogram bucket for nodes that carry no label at all
pub const UNLABELED: &str = "(unlabeled)";

/// Projection shared by every `(n, r, m)` read query. Nodes are flattened to
/// id / labels / name so rows can be decoded without touching driver node types.
const RECORD_PROJECTION: &str = r#"
    RETURN elementId(n) AS n_id, labels(n) AS n_labels, n.name AS n_name,
           type(r) AS r_type,
           elementId(m) AS m_id, labels(m) AS m_labels, m.name AS m_name
"#;

/// Client for Neo4j operations
pub struct Neo4jClient {
    graph: Arc<Graph>,
}

impl Neo4jClient {
    /// Connect to Neo4j and verify the connection eagerly.
    pub async fn new(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .context("Failed to connect to Neo4j")?;

        let client = Self {
            graph: Arc::new(graph),
        };

        client
            .execute("RETURN 1 AS ping")
            .await
            .with_context(|| format!("Neo4j at {} is not reachable", uri))?;

        client.init_schema().await;

        Ok(client)
    }

    /// Create name indexes for every creatable label
    async fn init_schema(&self) {
        for label in NodeLabel::ALL {
            let cypher = format!(
                "CREATE INDEX {}_name IF NOT EXISTS FOR (n:{}) ON (n.name)",
                label.as_cypher().to_lowercase(),
                label.as_cypher()
            );
            if let Err(e) = self.graph.run(query(&cypher)).await {
                tracing::warn!("Index may already exist: {}", e);
            }
        }
    }

    /// Execute a raw Cypher query (internal use only)
    pub(crate) async fn execute(&self, cypher: &str) -> Result<Vec<neo4rs::Row>> {
        self.execute_with_params(query(cypher)).await
    }

    /// Execute a parameterized Cypher query (internal use only)
    pub(crate) async fn execute_with_params(&self, q: Query) -> Result<Vec<neo4rs::Row>> {
        let mut result = self.graph.execute(q).await?;
        let mut rows = Vec::new();
        while let Some(row) = result.next().await? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Run a query built on [`RECORD_PROJECTION`] and decode its rows
    async fn fetch_records(&self, q: Query) -> Result<Vec<QueryRecord>> {
        let rows = self.execute_with_params(q).await?;
        rows.iter().map(row_to_record).collect()
    }

    // ========================================================================
    // Read queries
    // ========================================================================

    /// Nodes whose name contains `term`, with their neighbors
    pub async fn search_neighbors(&self, term: &str, limit: usize) -> Result<Vec<QueryRecord>> {
        let cypher = format!(
            r#"
            MATCH (n)
            WHERE n.name CONTAINS $name
            OPTIONAL MATCH (n)-[r]-(m)
            {}
            LIMIT $limit
            "#,
            RECORD_PROJECTION
        );
        let q = query(&cypher)
            .param("name", term)
            .param("limit", limit as i64);

        let records = self.fetch_records(q).await?;
        tracing::debug!(term, limit, records = records.len(), "search_neighbors");
        Ok(records)
    }

    /// Sample of nodes with their outgoing relationships
    pub async fn sample_graph(&self, limit: usize) -> Result<Vec<QueryRecord>> {
        let cypher = format!(
            r#"
            MATCH (n)
            OPTIONAL MATCH (n)-[r]->(m)
            {}
            LIMIT $limit
            "#,
            RECORD_PROJECTION
        );
        let q = query(&cypher).param("limit", limit as i64);

        let records = self.fetch_records(q).await?;
        tracing::debug!(limit, records = records.len(), "sample_graph");
        Ok(records)
    }

    /// Shortest undirected path between two named nodes.
    ///
    /// Each relationship on the path is expanded into its own
    /// `(startNode(r), r, endNode(r))` record, preserving path order.
    pub async fn shortest_path(&self, start: &str, end: &str) -> Result<Vec<QueryRecord>> {
        let cypher = format!(
            r#"
            MATCH (p1 {{name: $start}}), (p2 {{name: $end}}),
                  path = shortestPath((p1)-[*]-(p2))
            UNWIND relationships(path) AS r
            WITH startNode(r) AS n, r, endNode(r) AS m
            {}
            "#,
            RECORD_PROJECTION
        );
        let q = query(&cypher).param("start", start).param("end", end);

        let records = self.fetch_records(q).await?;
        tracing::debug!(start, end, edges = records.len(), "shortest_path");
        Ok(records)
    }

    /// Node counts per first label
    pub async fn label_histogram(&self) -> Result<Vec<LabelCount>> {
        let rows = self
            .execute(
                r#"
                MATCH (n)
                RETURN labels(n)[0] AS label, count(*) AS count
                ORDER BY count DESC
                "#,
            )
            .await?;

        let mut histogram = Vec::with_capacity(rows.len());
        for row in rows {
            histogram.push(LabelCount {
                label: row
                    .get::<String>("label")
                    .unwrap_or_else(|_| UNLABELED.to_string()),
                count: row.get("count")?,
            });
        }
        Ok(histogram)
    }

    /// Sorted node names
    pub async fn list_node_names(&self, limit: usize) -> Result<Vec<String>> {
        let q = query(
            r#"
            MATCH (n)
            WHERE n.name IS NOT NULL
            RETURN n.name AS name
            ORDER BY n.name
            LIMIT $limit
            "#,
        )
        .param("limit", limit as i64);

        let rows = self.execute_with_params(q).await?;
        Ok(rows
            .iter()
            .filter_map(|row| row.get::<String>("name").ok())
            .collect())
    }

    // ========================================================================
    // Writes
    // ========================================================================

    /// MERGE a labeled node by name
    pub async fn merge_node(&self, label: NodeLabel, name: &str) -> Result<()> {
        let cypher = format!("MERGE (n:{} {{name: $name}}) RETURN n", label.as_cypher());
        self.graph.run(query(&cypher).param("name", name)).await?;
        tracing::info!(%label, name, "Merged node");
        Ok(())
    }

    /// MERGE a relationship between two existing nodes
    pub async fn merge_relationship(
        &self,
        start: &str,
        end: &str,
        rel_type: RelationshipType,
    ) -> Result<bool> {
        let cypher = format!(
            r#"
            MATCH (a), (b)
            WHERE a.name = $start AND b.name = $end
            MERGE (a)-[r:{}]->(b)
            RETURN type(r) AS rel_type
            "#,
            rel_type.as_cypher()
        );
        let q = query(&cypher).param("start", start).param("end", end);

        let rows = self.execute_with_params(q).await?;
        let linked = !rows.is_empty();
        if linked {
            tracing::info!(start, end, %rel_type, "Merged relationship");
        } else {
            tracing::debug!(start, end, %rel_type, "Relationship endpoints not found");
        }
        Ok(linked)
    }

    /// Check connectivity
    pub async fn health_check(&self) -> Result<bool> {
        match self.execute("RETURN 1 AS ping").await {
            Ok(_) => Ok(true),
            Err(_) => Ok(false),
        }
    }
}

/// Decode one node out of a projected row. `None` when the id column is null.
fn entity_from_row(row: &neo4rs::Row, prefix: &str) -> Option<GraphEntity> {
    let element_id: String = row.get(&format!("{}_id", prefix)).ok()?;
    Some(GraphEntity {
        element_id,
        labels: row
            .get::<Vec<String>>(&format!("{}_labels", prefix))
            .unwrap_or_default(),
        name: row
            .get::<BoltType>(&format!("{}_name", prefix))
            .ok()
            .and_then(|value| display_value(&value)),
    })
}

/// Display form of a property value. `name` is not always a string.
fn display_value(value: &BoltType) -> Option<String> {
    match value {
        BoltType::Null(_) => None,
        BoltType::String(s) => Some(s.value.clone()),
        BoltType::Integer(i) => Some(i.value.to_string()),
        BoltType::Float(f) => Some(f.value.to_string()),
        BoltType::Boolean(b) => Some(b.value.to_string()),
        BoltType::List(list) => {
            let items: Vec<String> = list.value.iter().filter_map(display_value).collect();
            Some(format!("[{}]", items.join(", ")))
        }
        other => Some(format!("{:?}", other)),
    }
}

fn row_to_record(row: &neo4rs::Row) -> Result<QueryRecord> {
    let n = entity_from_row(row, "n").context("Query row has no source node")?;
    let r = row
        .get::<String>("r_type")
        .ok()
        .map(GraphRelation::new);
    let m = entity_from_row(row, "m");
    Ok(QueryRecord { n, r, m })
}
