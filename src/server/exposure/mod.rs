//! API exposure modules for the supported protocols
//!
//! Each exposure consumes the shared [`AppState`](super::AppState) and
//! produces an axum `Router` for its protocol. The core resolution logic
//! lives below this layer and knows nothing about HTTP.

pub mod graphql;
pub mod rest;

pub use graphql::GraphQlExposure;
pub use rest::RestExposure;

use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

/// Health check endpoint handler
async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "microblog"
    }))
}
