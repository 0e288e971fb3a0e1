//! Record types returned by the graph store.
//!
//! These mirror what a Cypher `RETURN n, r, m` yields, reduced to the fields the
//! dashboard actually reads: the element id, the label set and the `name`
//! property of each node, and the type of each relationship.

use serde::{Deserialize, Serialize};

/// A node as surfaced by a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEntity {
    /// Opaque identifier issued by the store (`elementId(n)`)
    pub element_id: String,
    /// Labels in the order the store returned them
    #[serde(default)]
    pub labels: Vec<String>,
    /// The `name` property, if the node has one
    #[serde(default)]
    pub name: Option<String>,
}

impl GraphEntity {
    pub fn new(element_id: impl Into<String>, labels: &[&str], name: Option<&str>) -> Self {
        Self {
            element_id: element_id.into(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            name: name.map(str::to_string),
        }
    }
}

/// A relationship as surfaced by a single query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphRelation {
    /// Relationship type, e.g. `CAUSES`
    pub rel_type: String,
}

impl GraphRelation {
    pub fn new(rel_type: impl Into<String>) -> Self {
        Self {
            rel_type: rel_type.into(),
        }
    }
}

/// One `(n, r, m)` row.
///
/// `n` is always present. `r` and `m` come from an `OPTIONAL MATCH` and are
/// independently nullable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRecord {
    pub n: GraphEntity,
    #[serde(default)]
    pub r: Option<GraphRelation>,
    #[serde(default)]
    pub m: Option<GraphEntity>,
}

impl QueryRecord {
    /// A record with no relationship (isolated node)
    pub fn isolated(n: GraphEntity) -> Self {
        Self { n, r: None, m: None }
    }

    /// A complete `(n)-[r]->(m)` triple
    pub fn linked(n: GraphEntity, r: GraphRelation, m: GraphEntity) -> Self {
        Self {
            n,
            r: Some(r),
            m: Some(m),
        }
    }

    /// Returns the relationship and target only when both are present.
    pub fn link(&self) -> Option<(&GraphRelation, &GraphEntity)> {
        match (&self.r, &self.m) {
            (Some(r), Some(m)) => Some((r, m)),
            _ => None,
        }
    }
}

/// One bucket of the label histogram
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: i64,
}
