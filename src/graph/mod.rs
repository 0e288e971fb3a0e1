//! Projection engine.
//!
//! Turns the heterogeneous `(n, r, m)` records returned by the graph store into
//! what the dashboard displays.
//!
//! ## Architecture
//!
//! ```text
//! GraphStore ──► QueryRecord[] ──► projection ──► VisualGraph (petgraph)
//!                                       │               + RelationshipRow[]
//!                                    palette
//! ```
//!
//! ## Modules
//!
//! - [`models`] - Data structures (VisualNode, VisualEdge, RelationshipRow, VisualGraph)
//! - [`palette`] - Label → color mapping and display fallbacks
//! - [`projection`] - The single-pass record → graph projection

pub mod models;
pub mod palette;
pub mod projection;

pub use models::{
    Projection, ProjectionView, RelationshipRow, ViewSummary, VisualEdge, VisualGraph, VisualNode,
};
pub use projection::project;
