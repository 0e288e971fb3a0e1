//! Visual graph data models.
//!
//! ## Output types (projection → presentation)
//! - [`VisualNode`] / [`VisualEdge`] - what the diagram draws
//! - [`RelationshipRow`] - one line of the relationship table
//! - [`VisualGraph`] - petgraph wrapper with element id ↔ NodeIndex mapping
//! - [`Projection`] - the full result of one render pass

use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Default node size in the diagram
pub const NODE_SIZE: u32 = 20;

/// Default node font size in the diagram
pub const NODE_FONT_SIZE: u32 = 14;

// ============================================================================
// Diagram elements
// ============================================================================

/// A node as drawn in the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisualNode {
    /// Store element id
    pub id: String,
    /// Display name ("N/A" when absent)
    pub name: String,
    /// Display label ("Concept" when the node has no labels)
    pub label: String,
    /// Fill color resolved from the label
    pub color: String,
    pub size: u32,
    pub font_size: u32,
}

/// A directed, typed edge as drawn in the diagram.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualEdge {
    pub source: String,
    pub target: String,
    pub rel_type: String,
}

/// One line of the relationship table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipRow {
    pub source_name: String,
    pub source_label: String,
    pub rel_type: String,
    pub target_name: String,
    pub target_label: String,
}

// ============================================================================
// VisualGraph - petgraph wrapper with ID mapping
// ============================================================================

/// Wrapper around `petgraph::DiGraph` with element id ↔ NodeIndex mapping and
/// edge deduplication on `(source, target, type)`.
#[derive(Debug, Clone, Default)]
pub struct VisualGraph {
    pub graph: DiGraph<VisualNode, VisualEdge>,
    pub id_to_index: HashMap<String, NodeIndex>,
    edge_keys: HashSet<(NodeIndex, NodeIndex, String)>,
}

impl VisualGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            graph: DiGraph::with_capacity(nodes, edges),
            id_to_index: HashMap::with_capacity(nodes),
            edge_keys: HashSet::with_capacity(edges),
        }
    }

    /// Whether a node with this element id is already present
    pub fn contains(&self, id: &str) -> bool {
        self.id_to_index.contains_key(id)
    }

    /// Add a node. If a node with the same id already exists, returns its
    /// existing index and leaves it unchanged.
    pub fn add_node(&mut self, node: VisualNode) -> NodeIndex {
        if let Some(&idx) = self.id_to_index.get(&node.id) {
            return idx;
        }
        let id = node.id.clone();
        let idx = self.graph.add_node(node);
        self.id_to_index.insert(id, idx);
        idx
    }

    /// Add an edge between two nodes identified by their ids.
    ///
    /// Returns `None` when either endpoint is unknown or an edge with the same
    /// `(source, target, type)` already exists.
    pub fn add_edge(&mut self, edge: VisualEdge) -> Option<EdgeIndex> {
        let from = *self.id_to_index.get(&edge.source)?;
        let to = *self.id_to_index.get(&edge.target)?;
        if !self.edge_keys.insert((from, to, edge.rel_type.clone())) {
            return None;
        }
        Some(self.graph.add_edge(from, to, edge))
    }

    pub fn get_node(&self, id: &str) -> Option<&VisualNode> {
        let idx = self.id_to_index.get(id)?;
        self.graph.node_weight(*idx)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &VisualNode> {
        self.graph.node_weights()
    }

    /// Edges in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &VisualEdge> {
        self.graph.edge_weights()
    }
}

// ============================================================================
// Projection result
// ============================================================================

/// What the relationship table should say about the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSummary {
    /// At least one relationship row
    Relationships { count: usize },
    /// Nodes but no relationships
    IsolatedOnly { nodes: usize },
    /// Nothing to show
    Empty,
}

/// Result of projecting one batch of query records.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    pub graph: VisualGraph,
    /// One row per complete record, in input order
    pub rows: Vec<RelationshipRow>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn summary(&self) -> ViewSummary {
        if !self.rows.is_empty() {
            ViewSummary::Relationships {
                count: self.rows.len(),
            }
        } else if self.graph.node_count() > 0 {
            ViewSummary::IsolatedOnly {
                nodes: self.graph.node_count(),
            }
        } else {
            ViewSummary::Empty
        }
    }

    /// Flatten into serializable vectors
    pub fn to_view(&self) -> ProjectionView {
        ProjectionView {
            nodes: self.graph.nodes().cloned().collect(),
            edges: self.graph.edges().cloned().collect(),
            rows: self.rows.clone(),
            summary: self.summary(),
        }
    }
}

/// Serializable form of a [`Projection`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionView {
    pub nodes: Vec<VisualNode>,
    pub edges: Vec<VisualEdge>,
    pub rows: Vec<RelationshipRow>,
    pub summary: ViewSummary,
}
