//! HTTP API for the dashboard

pub mod handlers;
pub mod query;
pub mod routes;

pub use query::*;
pub use routes::create_router;
