//! Health check endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::connection::Connector;
use crate::http::server::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the lazy connection has been established yet
    pub database_connected: bool,
}

/// GET /health - does not force a connection
async fn health<C: Connector>(State(state): State<Arc<AppState<C>>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database_connected: state.connections.is_connected().await,
    })
}

/// Health routes
pub fn router<C: Connector>() -> Router<Arc<AppState<C>>> {
    Router::new().route("/health", get(health::<C>))
}
