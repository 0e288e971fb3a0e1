//! Interactive diagram rendering.
//!
//! A projection is rendered into a self-contained HTML page driven by the
//! vis-network browser library. Each render pass writes the page to a scratch
//! file and reads it back; the file is removed afterwards.

use crate::graph::{Projection, ViewSummary};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const TEMPLATE: &str = include_str!("../../templates/graph_view.html");

/// Default diagram height in pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// Barnes-Hut physics parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarnesHut {
    pub gravitational_constant: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_constant: f64,
    pub damping: f64,
    pub avoid_overlap: f64,
}

impl Default for BarnesHut {
    fn default() -> Self {
        Self {
            gravitational_constant: -2000.0,
            central_gravity: 0.1,
            spring_length: 150.0,
            spring_constant: 0.04,
            damping: 0.09,
            avoid_overlap: 0.0,
        }
    }
}

/// Layout knobs for one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    pub physics: bool,
    pub height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            physics: true,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl RenderOptions {
    /// vis-network `options` object
    fn network_options(&self) -> serde_json::Value {
        serde_json::json!({
            "physics": {
                "enabled": self.physics,
                "solver": "barnesHut",
                "barnesHut": BarnesHut::default(),
            },
            "edges": { "smooth": false },
        })
    }
}

/// Caption shown above the relationship table
pub fn summary_text(summary: ViewSummary) -> String {
    match summary {
        ViewSummary::Relationships { count } => format!("Showing {} relationships.", count),
        ViewSummary::IsolatedOnly { .. } => {
            "All nodes in this view are isolated; there are no relationships to show.".to_string()
        }
        ViewSummary::Empty => "No data in the current view.".to_string(),
    }
}

/// Serialize for embedding inside a `<script>` block. Every `<` is escaped so
/// no value can open or close a tag.
fn script_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

/// Fill `{{NAME}}` placeholders in one scan of the template. Substituted
/// values are never scanned again; unknown placeholders are kept verbatim.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 2..];
        let value = tail.find("}}").and_then(|close| {
            let key = &tail[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match value {
            Some((value, close)) => {
                out.push_str(value);
                rest = &tail[close + 2..];
            }
            None => {
                out.push_str("{{");
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Render a projection to an HTML page.
pub fn render_html(projection: &Projection, options: &RenderOptions) -> Result<String> {
    let view = projection.to_view();
    let height = options.height.to_string();
    let view_json = script_json(&view)?;
    let options_json = script_json(&options.network_options())?;
    let summary_json = script_json(&summary_text(view.summary))?;

    Ok(fill_template(
        TEMPLATE,
        &[
            ("HEIGHT", height.as_str()),
            ("VIEW_JSON", view_json.as_str()),
            ("OPTIONS_JSON", options_json.as_str()),
            ("SUMMARY_JSON", summary_json.as_str()),
        ],
    ))
}

/// Renders diagrams through a scratch directory.
#[derive(Debug, Clone)]
pub struct GraphRenderer {
    scratch_dir: PathBuf,
}

impl GraphRenderer {
    pub fn new(scratch_dir: impl Into<PathBuf>) -> Self {
        Self {
            scratch_dir: scratch_dir.into(),
        }
    }

    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Render, write to a scratch file, read it back and delete it.
    pub async fn render(&self, projection: &Projection, options: &RenderOptions) -> Result<String> {
        let html = render_html(projection, options)?;

        tokio::fs::create_dir_all(&self.scratch_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.scratch_dir.display()))?;

        let path = self.scratch_dir.join(format!("graph-{}.html", Uuid::new_v4()));
        tokio::fs::write(&path, html.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        let page = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read back {}", path.display()))?;

        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::debug!("Could not remove scratch file {}: {}", path.display(), e);
        }

        Ok(page)
    }
}
