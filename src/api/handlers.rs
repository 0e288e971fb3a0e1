//! API request handlers

use crate::api::GraphQuery;
use crate::explorer::{ReadStatus, WriteOutcome};
use crate::graph::{palette, ProjectionView};
use crate::neo4j::{LabelCount, NodeLabel, RelationshipType};
use crate::preview::{preview_csv, CsvPreview};
use crate::render::summary_text;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};

const DASHBOARD: &str = include_str!("../../templates/dashboard.html");

// ============================================================================
// Health & shell
// ============================================================================

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check handler. 503 when Neo4j does not answer.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let neo4j_ok = state.neo4j.health_check().await.unwrap_or(false);

    let (http_status, status) = if neo4j_ok {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        http_status,
        Json(HealthResponse {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Dashboard page with the explore, statistics and maintenance tabs
pub async fn index() -> Html<&'static str> {
    Html(DASHBOARD)
}

// ============================================================================
// Explore
// ============================================================================

/// Projection of one render pass, plus how the read went
#[derive(Serialize)]
pub struct GraphResponse {
    pub status: ReadStatus,
    #[serde(flatten)]
    pub view: ProjectionView,
    pub summary_text: String,
}

/// Run the query the sidebar controls ask for and return the projection
pub async fn get_graph(
    State(state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> Json<GraphResponse> {
    let request = query.to_view_request(state.config.default_limit);
    let result = state.explorer.explore(&request).await;
    let view = result.projection.to_view();

    Json(GraphResponse {
        status: result.status,
        summary_text: summary_text(view.summary),
        view,
    })
}

/// Same as [`get_graph`], rendered as an interactive HTML diagram
pub async fn get_graph_view(
    State(state): State<AppState>,
    Query(query): Query<GraphQuery>,
) -> Result<Html<String>, AppError> {
    let request = query.to_view_request(state.config.default_limit);
    let options = query.render_options(state.config.render_options());
    let result = state.explorer.explore(&request).await;
    let page = state.renderer.render(&result.projection, &options).await?;
    Ok(Html(page))
}

// ============================================================================
// Statistics & selection lists
// ============================================================================

#[derive(Serialize)]
pub struct LabelStatsResponse {
    pub status: ReadStatus,
    pub counts: Vec<LabelCount>,
}

/// Node count per label, largest first
pub async fn label_stats(State(state): State<AppState>) -> Json<LabelStatsResponse> {
    let outcome = state.explorer.label_histogram().await;
    Json(LabelStatsResponse {
        status: outcome.status(),
        counts: outcome.into_data(),
    })
}

#[derive(Serialize)]
pub struct NodeNamesResponse {
    pub status: ReadStatus,
    pub names: Vec<String>,
}

/// Sorted node names for the path and link selectors
pub async fn node_names(State(state): State<AppState>) -> Json<NodeNamesResponse> {
    let outcome = state.explorer.list_all_node_names().await;
    Json(NodeNamesResponse {
        status: outcome.status(),
        names: outcome.into_data(),
    })
}

// ============================================================================
// Maintenance
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateNodeRequest {
    pub label: String,
    pub name: String,
}

/// Create a node. Unknown labels are rejected before reaching the store.
pub async fn create_node(
    State(state): State<AppState>,
    Json(req): Json<CreateNodeRequest>,
) -> Result<Json<WriteOutcome>, AppError> {
    let label: NodeLabel = req
        .label
        .parse()
        .map_err(|e: crate::neo4j::SchemaError| AppError::BadRequest(e.to_string()))?;
    Ok(Json(state.explorer.upsert_node(label, &req.name).await))
}

#[derive(Debug, Deserialize)]
pub struct CreateRelationshipRequest {
    pub start: String,
    pub end: String,
    pub rel_type: String,
}

/// Link two existing nodes by name
pub async fn create_relationship(
    State(state): State<AppState>,
    Json(req): Json<CreateRelationshipRequest>,
) -> Result<Json<WriteOutcome>, AppError> {
    let rel_type: RelationshipType = req
        .rel_type
        .parse()
        .map_err(|e: crate::neo4j::SchemaError| AppError::BadRequest(e.to_string()))?;
    Ok(Json(
        state
            .explorer
            .upsert_relationship(&req.start, &req.end, rel_type)
            .await,
    ))
}

/// Parse an uploaded CSV body for display. Nothing is imported.
pub async fn csv_preview(body: Bytes) -> Result<Json<CsvPreview>, AppError> {
    preview_csv(&body)
        .map(Json)
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

#[derive(Serialize)]
pub struct PaletteEntry {
    pub label: &'static str,
    pub color: &'static str,
}

/// Closed vocabularies and label colors
#[derive(Serialize)]
pub struct SchemaResponse {
    pub labels: Vec<&'static str>,
    pub relationship_types: Vec<&'static str>,
    pub palette: Vec<PaletteEntry>,
    pub fallback_color: &'static str,
}

pub async fn schema() -> Json<SchemaResponse> {
    Json(SchemaResponse {
        labels: NodeLabel::ALL.iter().map(|l| l.as_cypher()).collect(),
        relationship_types: RelationshipType::ALL
            .iter()
            .map(|r| r.as_cypher())
            .collect(),
        palette: palette::entries()
            .iter()
            .map(|&(label, color)| PaletteEntry { label, color })
            .collect(),
        fallback_color: palette::FALLBACK_COLOR,
    })
}

/// Fallback for unknown routes
pub async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

// ============================================================================
// Error handling
// ============================================================================

/// Application error type
#[derive(Debug)]
pub enum AppError {
    Internal(anyhow::Error),
    NotFound(String),
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Internal(e) => {
                tracing::error!(error = %e, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
