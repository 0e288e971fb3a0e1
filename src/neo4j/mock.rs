//! In-memory mock implementation of GraphStore for testing.
//!
//! Mirrors the Cypher semantics the dashboard relies on: `CONTAINS` search with
//! optional neighbors, outgoing-only sampling, undirected shortest path, and
//! MERGE for writes. Conditionally compiled with `#[cfg(test)]`.

use crate::neo4j::models::*;
use crate::neo4j::schema::{NodeLabel, RelationshipType};
use crate::neo4j::traits::GraphStore;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// A stored relationship, endpoints referenced by element id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockRelationship {
    pub start: String,
    pub end: String,
    pub rel_type: String,
}

/// In-memory mock implementation of GraphStore for testing.
pub struct MockGraphStore {
    pub nodes: RwLock<Vec<GraphEntity>>,
    pub relationships: RwLock<Vec<MockRelationship>>,
    /// When set, every read query fails as if the store were unreachable
    pub fail_reads: AtomicBool,
}

impl MockGraphStore {
    /// Create a new empty MockGraphStore.
    pub fn new() -> Self {
        Self {
            nodes: RwLock::new(Vec::new()),
            relationships: RwLock::new(Vec::new()),
            fail_reads: AtomicBool::new(false),
        }
    }

    /// Insert a node unconditionally and return its element id
    pub async fn add_node(&self, labels: &[&str], name: Option<&str>) -> String {
        let mut nodes = self.nodes.write().await;
        let id = format!("4:mock:{}", nodes.len());
        nodes.push(GraphEntity::new(id.clone(), labels, name));
        id
    }

    /// Insert a relationship unconditionally
    pub async fn add_relationship(&self, start: &str, end: &str, rel_type: &str) {
        self.relationships.write().await.push(MockRelationship {
            start: start.to_string(),
            end: end.to_string(),
            rel_type: rel_type.to_string(),
        });
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check_reads(&self) -> Result<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            Err(anyhow!("simulated store failure"))
        } else {
            Ok(())
        }
    }

    fn record(
        index: &HashMap<&str, &GraphEntity>,
        n: &GraphEntity,
        rel: &MockRelationship,
        other: &str,
    ) -> Option<QueryRecord> {
        let m = index.get(other)?;
        Some(QueryRecord::linked(
            n.clone(),
            GraphRelation::new(rel.rel_type.clone()),
            (*m).clone(),
        ))
    }
}

impl Default for MockGraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphStore for MockGraphStore {
    async fn search_neighbors(&self, term: &str, limit: usize) -> Result<Vec<QueryRecord>> {
        self.check_reads()?;
        let nodes = self.nodes.read().await;
        let rels = self.relationships.read().await;
        let index: HashMap<&str, &GraphEntity> =
            nodes.iter().map(|n| (n.element_id.as_str(), n)).collect();

        let mut records = Vec::new();
        for n in nodes
            .iter()
            .filter(|n| n.name.as_deref().is_some_and(|name| name.contains(term)))
        {
            let mut matched = false;
            for rel in rels.iter() {
                let other = if rel.start == n.element_id {
                    &rel.end
                } else if rel.end == n.element_id {
                    &rel.start
                } else {
                    continue;
                };
                if let Some(record) = Self::record(&index, n, rel, other) {
                    records.push(record);
                    matched = true;
                }
            }
            if !matched {
                records.push(QueryRecord::isolated(n.clone()));
            }
        }
        records.truncate(limit);
        Ok(records)
    }

    async fn sample_graph(&self, limit: usize) -> Result<Vec<QueryRecord>> {
        self.check_reads()?;
        let nodes = self.nodes.read().await;
        let rels = self.relationships.read().await;
        let index: HashMap<&str, &GraphEntity> =
            nodes.iter().map(|n| (n.element_id.as_str(), n)).collect();

        let mut records = Vec::new();
        for n in nodes.iter() {
            let outgoing: Vec<QueryRecord> = rels
                .iter()
                .filter(|rel| rel.start == n.element_id)
                .filter_map(|rel| Self::record(&index, n, rel, &rel.end))
                .collect();
            if outgoing.is_empty() {
                records.push(QueryRecord::isolated(n.clone()));
            } else {
                records.extend(outgoing);
            }
        }
        records.truncate(limit);
        Ok(records)
    }

    async fn shortest_path(&self, start: &str, end: &str) -> Result<Vec<QueryRecord>> {
        self.check_reads()?;
        let nodes = self.nodes.read().await;
        let rels = self.relationships.read().await;
        let index: HashMap<&str, &GraphEntity> =
            nodes.iter().map(|n| (n.element_id.as_str(), n)).collect();

        let find = |name: &str| {
            nodes
                .iter()
                .find(|n| n.name.as_deref() == Some(name))
                .map(|n| n.element_id.clone())
        };
        let (Some(source), Some(target)) = (find(start), find(end)) else {
            return Ok(Vec::new());
        };

        // BFS over undirected adjacency, remembering the relationship used to
        // reach each node
        let mut came_from: HashMap<String, usize> = HashMap::new();
        let mut queue = VecDeque::from([source.clone()]);
        let mut visited = vec![source.clone()];
        while let Some(current) = queue.pop_front() {
            if current == target {
                break;
            }
            for (i, rel) in rels.iter().enumerate() {
                let next = if rel.start == current {
                    &rel.end
                } else if rel.end == current {
                    &rel.start
                } else {
                    continue;
                };
                if !visited.contains(next) {
                    visited.push(next.clone());
                    came_from.insert(next.clone(), i);
                    queue.push_back(next.clone());
                }
            }
        }

        if !came_from.contains_key(&target) {
            return Ok(Vec::new());
        }

        let mut path = Vec::new();
        let mut cursor = target;
        while cursor != source {
            let rel = &rels[came_from[&cursor]];
            cursor = if rel.start == cursor {
                rel.end.clone()
            } else {
                rel.start.clone()
            };
            path.push(rel);
        }
        path.reverse();

        Ok(path
            .into_iter()
            .filter_map(|rel| {
                let n = index.get(rel.start.as_str())?;
                Self::record(&index, n, rel, &rel.end)
            })
            .collect())
    }

    async fn label_histogram(&self) -> Result<Vec<LabelCount>> {
        self.check_reads()?;
        let nodes = self.nodes.read().await;
        let mut counts: HashMap<String, i64> = HashMap::new();
        for n in nodes.iter() {
            let label = n
                .labels
                .first()
                .cloned()
                .unwrap_or_else(|| crate::neo4j::client::UNLABELED.to_string());
            *counts.entry(label).or_default() += 1;
        }
        let mut histogram: Vec<LabelCount> = counts
            .into_iter()
            .map(|(label, count)| LabelCount { label, count })
            .collect();
        histogram.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
        Ok(histogram)
    }

    async fn list_node_names(&self, limit: usize) -> Result<Vec<String>> {
        self.check_reads()?;
        let nodes = self.nodes.read().await;
        let mut names: Vec<String> = nodes.iter().filter_map(|n| n.name.clone()).collect();
        names.sort();
        names.truncate(limit);
        Ok(names)
    }

    async fn merge_node(&self, label: NodeLabel, name: &str) -> Result<()> {
        let exists = self.nodes.read().await.iter().any(|n| {
            n.name.as_deref() == Some(name) && n.labels.iter().any(|l| l == label.as_cypher())
        });
        if !exists {
            self.add_node(&[label.as_cypher()], Some(name)).await;
        }
        Ok(())
    }

    async fn merge_relationship(
        &self,
        start: &str,
        end: &str,
        rel_type: RelationshipType,
    ) -> Result<bool> {
        let nodes = self.nodes.read().await;
        let ids_named = |name: &str| -> Vec<String> {
            nodes
                .iter()
                .filter(|n| n.name.as_deref() == Some(name))
                .map(|n| n.element_id.clone())
                .collect()
        };
        let starts = ids_named(start);
        let ends = ids_named(end);
        drop(nodes);

        if starts.is_empty() || ends.is_empty() {
            return Ok(false);
        }

        let mut rels = self.relationships.write().await;
        for a in &starts {
            for b in &ends {
                let candidate = MockRelationship {
                    start: a.clone(),
                    end: b.clone(),
                    rel_type: rel_type.as_cypher().to_string(),
                };
                if !rels.contains(&candidate) {
                    rels.push(candidate);
                }
            }
        }
        Ok(true)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(!self.fail_reads.load(Ordering::SeqCst))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_search_keeps_isolated_matches() {
        let store = MockGraphStore::new();
        let a = store.add_node(&["Theory"], Some("radiation")).await;
        let b = store.add_node(&["Element"], Some("shield")).await;
        store.add_node(&["Case"], Some("radiated noise")).await;
        store.add_relationship(&b, &a, "SOLVES").await;

        let records = store.search_neighbors("radi", 50).await.unwrap();
        assert_eq!(records.len(), 2);
        // Undirected: the match is always `n`, the neighbor `m`
        assert_eq!(records[0].n.element_id, a);
        assert_eq!(records[0].m.as_ref().unwrap().element_id, b);
        assert!(records[1].link().is_none());
    }

    #[tokio::test]
    async fn test_shortest_path_is_ordered_by_hops() {
        let store = MockGraphStore::new();
        let a = store.add_node(&["Concept"], Some("A")).await;
        let b = store.add_node(&["Concept"], Some("B")).await;
        let c = store.add_node(&["Concept"], Some("C")).await;
        store.add_relationship(&a, &b, "CAUSES").await;
        store.add_relationship(&c, &b, "SOLVES").await;

        let path = store.shortest_path("A", "C").await.unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0].n.element_id, a);
        assert_eq!(path[0].r.as_ref().unwrap().rel_type, "CAUSES");
        // Second hop keeps the stored direction C -> B
        assert_eq!(path[1].n.element_id, c);
        assert_eq!(path[1].m.as_ref().unwrap().element_id, b);
    }

    #[tokio::test]
    async fn test_fail_reads() {
        let store = MockGraphStore::new();
        store.set_fail_reads(true);
        assert!(store.sample_graph(10).await.is_err());
        assert!(!store.health_check().await.unwrap());
    }
}
