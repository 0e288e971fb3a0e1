//! Closed vocabularies for labels and relationship types.
//!
//! Cypher does not accept labels or relationship types as bound parameters, so
//! write queries have to embed them in the query text. Only values from these
//! enums ever reach that text: each variant maps to a `&'static str` through a
//! `match`, and parsing rejects anything outside the set.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Rejected label or relationship type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Unknown node label: {0}")]
    UnknownLabel(String),

    #[error("Unknown relationship type: {0}")]
    UnknownRelationshipType(String),
}

/// Labels a user may assign when creating a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeLabel {
    Concept,
    Theory,
    Element,
    Case,
    Solution,
}

impl NodeLabel {
    pub const ALL: [NodeLabel; 5] = [
        Self::Concept,
        Self::Theory,
        Self::Element,
        Self::Case,
        Self::Solution,
    ];

    /// Label as it appears in Cypher (`MERGE (n:<label> ...)`)
    pub fn as_cypher(&self) -> &'static str {
        match self {
            Self::Concept => "Concept",
            Self::Theory => "Theory",
            Self::Element => "Element",
            Self::Case => "Case",
            Self::Solution => "Solution",
        }
    }
}

impl fmt::Display for NodeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cypher())
    }
}

impl FromStr for NodeLabel {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|label| label.as_cypher() == s)
            .ok_or_else(|| SchemaError::UnknownLabel(s.to_string()))
    }
}

/// Relationship types a user may create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    RelatedTo,
    Causes,
    Solves,
    Contains,
}

impl RelationshipType {
    pub const ALL: [RelationshipType; 4] = [
        Self::RelatedTo,
        Self::Causes,
        Self::Solves,
        Self::Contains,
    ];

    /// Type as it appears in Cypher (`MERGE (a)-[r:<type>]->(b)`)
    pub fn as_cypher(&self) -> &'static str {
        match self {
            Self::RelatedTo => "RELATED_TO",
            Self::Causes => "CAUSES",
            Self::Solves => "SOLVES",
            Self::Contains => "CONTAINS",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_cypher())
    }
}

impl FromStr for RelationshipType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|rel| rel.as_cypher() == s)
            .ok_or_else(|| SchemaError::UnknownRelationshipType(s.to_string()))
    }
}
