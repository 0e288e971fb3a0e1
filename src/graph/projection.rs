//! Query records → visual graph + relationship table.
//!
//! A single pass over the records. Each `n` is added once (dedup by element
//! id). A record contributes its target node, an edge and a table row only when
//! both `r` and `m` are present; records with a missing side contribute just
//! `n`. Re-adding an equivalent edge is ignored.

use super::models::{
    Projection, RelationshipRow, VisualEdge, VisualGraph, VisualNode, NODE_FONT_SIZE, NODE_SIZE,
};
use super::palette::{color_for, FALLBACK_LABEL, FALLBACK_NAME};
use crate::neo4j::models::{GraphEntity, QueryRecord};

/// First label, or [`FALLBACK_LABEL`]
pub fn display_label(entity: &GraphEntity) -> &str {
    entity
        .labels
        .first()
        .map(String::as_str)
        .unwrap_or(FALLBACK_LABEL)
}

/// `name` property, or [`FALLBACK_NAME`]
pub fn display_name(entity: &GraphEntity) -> &str {
    entity.name.as_deref().unwrap_or(FALLBACK_NAME)
}

fn visual_node(entity: &GraphEntity) -> VisualNode {
    let label = display_label(entity);
    VisualNode {
        id: entity.element_id.clone(),
        name: display_name(entity).to_string(),
        label: label.to_string(),
        color: color_for(label).to_string(),
        size: NODE_SIZE,
        font_size: NODE_FONT_SIZE,
    }
}

/// Project query records into a deduplicated visual graph and table rows.
pub fn project(records: &[QueryRecord]) -> Projection {
    let mut graph = VisualGraph::with_capacity(records.len() * 2, records.len());
    let mut rows = Vec::new();

    for record in records {
        let src = &record.n;
        if !graph.contains(&src.element_id) {
            graph.add_node(visual_node(src));
        }

        let Some((rel, tgt)) = record.link() else {
            continue;
        };

        if !graph.contains(&tgt.element_id) {
            graph.add_node(visual_node(tgt));
        }

        // Duplicate edges come back as None; nothing to report
        let _ = graph.add_edge(VisualEdge {
            source: src.element_id.clone(),
            target: tgt.element_id.clone(),
            rel_type: rel.rel_type.clone(),
        });

        rows.push(RelationshipRow {
            source_name: display_name(src).to_string(),
            source_label: display_label(src).to_string(),
            rel_type: rel.rel_type.clone(),
            target_name: display_name(tgt).to_string(),
            target_label: display_label(tgt).to_string(),
        });
    }

    Projection { graph, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::models::ViewSummary;
    use crate::graph::palette::FALLBACK_COLOR;
    use crate::neo4j::models::GraphRelation;
    use std::collections::HashSet;

    fn entity(id: &str, name: &str) -> GraphEntity {
        GraphEntity::new(id, &[], Some(name))
    }

    fn knows() -> GraphRelation {
        GraphRelation::new("KNOWS")
    }

    #[test]
    fn test_isolated_then_duplicate_links() {
        let a = entity("A", "A");
        let b = entity("B", "B");
        let records = vec![
            QueryRecord::isolated(a.clone()),
            QueryRecord::linked(a.clone(), knows(), b.clone()),
            QueryRecord::linked(a, knows(), b),
        ];

        let p = project(&records);

        let ids: HashSet<&str> = p.graph.nodes().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, HashSet::from(["A", "B"]));

        let edges: Vec<&VisualEdge> = p.graph.edges().collect();
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "A");
        assert_eq!(edges[0].target, "B");
        assert_eq!(edges[0].rel_type, "KNOWS");

        let expected = RelationshipRow {
            source_name: "A".into(),
            source_label: "Concept".into(),
            rel_type: "KNOWS".into(),
            target_name: "B".into(),
            target_label: "Concept".into(),
        };
        assert_eq!(p.rows, vec![expected.clone(), expected]);
    }

    #[test]
    fn test_half_records_contribute_only_source() {
        let a = entity("A", "A");
        let b = entity("B", "B");
        let records = vec![
            QueryRecord {
                n: a.clone(),
                r: Some(knows()),
                m: None,
            },
            QueryRecord {
                n: a,
                r: None,
                m: Some(b),
            },
        ];

        let p = project(&records);
        assert_eq!(p.graph.node_count(), 1);
        assert!(p.graph.get_node("B").is_none());
        assert_eq!(p.graph.edge_count(), 0);
        assert!(p.rows.is_empty());
        assert_eq!(p.summary(), ViewSummary::IsolatedOnly { nodes: 1 });
    }

    #[test]
    fn test_node_count_matches_distinct_ids() {
        let records = vec![
            QueryRecord::linked(entity("1", "one"), knows(), entity("2", "two")),
            QueryRecord::linked(entity("2", "two"), knows(), entity("3", "three")),
            QueryRecord::isolated(entity("4", "four")),
            QueryRecord::linked(entity("3", "three"), knows(), entity("1", "one")),
            QueryRecord {
                n: entity("5", "five"),
                r: None,
                m: Some(entity("6", "six")),
            },
        ];

        let p = project(&records);
        // 6 is only reachable through an incomplete record
        assert_eq!(p.graph.node_count(), 5);
        assert_eq!(p.graph.edge_count(), 3);
        assert_eq!(p.rows.len(), 3);
    }

    #[test]
    fn test_display_fallbacks_and_colors() {
        let bare = GraphEntity::new("x", &[], None);
        let typed = GraphEntity::new("y", &["Theory", "Case"], Some("Maxwell"));
        let unknown = GraphEntity::new("z", &["Person"], Some("Ada"));
        let records = vec![
            QueryRecord::linked(bare, GraphRelation::new("CAUSES"), typed),
            QueryRecord::isolated(unknown),
        ];

        let p = project(&records);
        let x = p.graph.get_node("x").unwrap();
        assert_eq!(x.name, "N/A");
        assert_eq!(x.label, "Concept");
        assert_eq!(x.color, "#C7C7C7");

        let y = p.graph.get_node("y").unwrap();
        assert_eq!(y.label, "Theory");
        assert_eq!(y.color, "#FF6B6B");

        let z = p.graph.get_node("z").unwrap();
        assert_eq!(z.color, FALLBACK_COLOR);

        assert_eq!(p.rows[0].source_name, "N/A");
        assert_eq!(p.rows[0].target_label, "Theory");
    }

    #[test]
    fn test_rows_keep_input_order() {
        let records = vec![
            QueryRecord::linked(entity("c", "c"), knows(), entity("a", "a")),
            QueryRecord::linked(entity("a", "a"), knows(), entity("b", "b")),
            QueryRecord::linked(entity("b", "b"), knows(), entity("c", "c")),
        ];
        let names: Vec<_> = project(&records)
            .rows
            .into_iter()
            .map(|r| r.source_name)
            .collect();
        assert_eq!(names, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let records = vec![
            QueryRecord::linked(entity("1", "one"), knows(), entity("2", "two")),
            QueryRecord::isolated(entity("3", "three")),
            QueryRecord::linked(entity("2", "two"), GraphRelation::new("SOLVES"), entity("1", "one")),
        ];
        assert_eq!(project(&records).to_view(), project(&records).to_view());
    }

    #[test]
    fn test_empty_input() {
        let p = project(&[]);
        assert!(p.is_empty());
        assert_eq!(p.graph.edge_count(), 0);
        assert!(p.rows.is_empty());
        assert_eq!(p.summary(), ViewSummary::Empty);
    }
}
