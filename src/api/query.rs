//! Query string parameters for the graph endpoints

use crate::explorer::{ExploreMode, ViewRequest};
use crate::render::RenderOptions;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Helper to deserialize optional values from query string (which are always strings)
fn deserialize_option_from_str<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    use serde::de::Error;
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.is_empty() => s.parse().map(Some).map_err(D::Error::custom),
        _ => Ok(None),
    }
}

/// Sidebar controls, as sent by the dashboard
#[derive(Debug, Deserialize, Default, Clone)]
pub struct GraphQuery {
    /// `neighbors` (default) or `path`
    pub mode: Option<ExploreMode>,
    /// Neighbors mode: show the whole graph instead of searching
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub full: Option<bool>,
    /// Neighbors mode search term
    pub term: Option<String>,
    /// Path mode start node name
    pub start: Option<String>,
    /// Path mode end node name
    pub end: Option<String>,
    /// Node-count ceiling, clamped to [20, 1000]
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub limit: Option<usize>,
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub physics: Option<bool>,
    /// Diagram height in pixels
    #[serde(default, deserialize_with = "deserialize_option_from_str")]
    pub height: Option<u32>,
}

impl GraphQuery {
    /// Build the view request, filling gaps from the configured defaults
    pub fn to_view_request(&self, default_limit: usize) -> ViewRequest {
        let mode = self.mode.unwrap_or_default();
        ViewRequest {
            mode,
            // The full graph is the default view when no search term is given
            full_graph: self
                .full
                .unwrap_or_else(|| self.term.as_deref().map_or(true, str::is_empty)),
            term: self.term.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            limit: self.limit.unwrap_or(default_limit),
        }
    }

    /// Layout options; path mode always runs with physics on
    pub fn render_options(&self, defaults: RenderOptions) -> RenderOptions {
        let physics = match self.mode.unwrap_or_default() {
            ExploreMode::Path => true,
            ExploreMode::Neighbors => self.physics.unwrap_or(defaults.physics),
        };
        RenderOptions {
            physics,
            height: self.height.unwrap_or(defaults.height),
        }
    }
}
