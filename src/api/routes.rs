//! API route definitions

use super::handlers;
use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the dashboard router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        // Health check
        .route("/health", get(handlers::health))
        // ====================================================================
        // Explore
        // ====================================================================
        .route("/api/graph", get(handlers::get_graph))
        .route("/api/graph/view", get(handlers::get_graph_view))
        // ====================================================================
        // Statistics & selection lists
        // ====================================================================
        .route("/api/stats/labels", get(handlers::label_stats))
        .route("/api/nodes/names", get(handlers::node_names))
        .route("/api/schema", get(handlers::schema))
        // ====================================================================
        // Maintenance
        // ====================================================================
        .route("/api/nodes", post(handlers::create_node))
        .route("/api/relationships", post(handlers::create_relationship))
        .route("/api/csv/preview", post(handlers::csv_preview))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
