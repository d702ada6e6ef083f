// src/routes/health.rs
//! API health check endpoint for the Silent Watch backend.
//!
//! Used by container orchestrators and CI to verify that the service is
//! running and able to respond to HTTP requests. Follows the Explicit Module
//! Boundary Pattern (EMBP):
//! - Internal to this file: endpoint handler and its response type
//! - Exports to the gateway (`mod.rs`): a subrouter containing `/health`

use axum::{routing::get, Json, Router};
use serde::Serialize;

/// JSON response body for the `/health` endpoint.
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// Handle `GET /health`.
///
/// Does not touch the store; a reachable process is a healthy one.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Create a subrouter containing the `/health` route.
///
/// Generic over the application state so it merges with the gateway router
/// regardless of the state type.
pub fn router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route("/health", get(health))
}
