//! Test helper factories and mock state builders
#![allow(dead_code)]

use crate::neo4j::mock::MockGraphStore;
use crate::{AppState, Config};
use std::path::Path;
use std::sync::Arc;

/// Config pointing at a mock store and the given scratch directory
pub fn mock_config(scratch_dir: &Path) -> Config {
    Config {
        neo4j_uri: "bolt://mock:7687".to_string(),
        neo4j_user: "neo4j".to_string(),
        neo4j_password: "mock".to_string(),
        server_port: 0,
        scratch_dir: scratch_dir.to_path_buf(),
        default_limit: crate::explorer::DEFAULT_NODE_LIMIT,
        physics: true,
        height: crate::render::DEFAULT_HEIGHT,
    }
}

/// Create a mock AppState with an empty in-memory store
pub fn mock_app_state(scratch_dir: &Path) -> AppState {
    mock_app_state_with(Arc::new(MockGraphStore::new()), scratch_dir)
}

/// Create a mock AppState around a pre-seeded store
pub fn mock_app_state_with(store: Arc<MockGraphStore>, scratch_dir: &Path) -> AppState {
    AppState::with_store(store, mock_config(scratch_dir))
}

/// Seed the small EMC graph used across handler tests:
/// power supply -CAUSES-> interference <-SOLVES- ferrite, plus isolated "grounding"
pub async fn seed_emc_graph(store: &MockGraphStore) {
    let supply = store.add_node(&["Theory"], Some("power supply")).await;
    let interference = store.add_node(&["Case"], Some("interference")).await;
    let ferrite = store.add_node(&["Solution"], Some("ferrite")).await;
    store.add_node(&["Concept"], Some("grounding")).await;
    store.add_relationship(&supply, &interference, "CAUSES").await;
    store.add_relationship(&ferrite, &interference, "SOLVES").await;
}
