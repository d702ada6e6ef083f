// src/routes/dashboard.rs
//! Dashboard endpoint for the Silent Watch backend.
//!
//! `GET /dashboard` serves the snapshot the poller last stored, rendered into
//! cards. It never queries the store itself. Follows the Explicit Module
//! Boundary Pattern (EMBP):
//! - Internal to this file: the handler and its response type
//! - Exports to the gateway (`mod.rs`): a subrouter containing `/dashboard`

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::debug;

use crate::display::{self, DashboardView};
use crate::poller::DashboardSnapshot;
use crate::AppState;

// ---

/// Body of `GET /dashboard`: the raw snapshot plus its rendered view.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    // ---
    pub active: bool,
    pub snapshot: DashboardSnapshot,
    pub view: DashboardView,
}

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/dashboard", get(handler))
}

/// Serve the last polled snapshot. Never hits the store directly.
async fn handler(State(state): State<AppState>) -> Json<DashboardResponse> {
    // ---
    let snapshot = state.snapshot.read().await.clone();
    let active = state.simulation.is_active();

    debug!(
        "GET /dashboard - reading={} alerts={} active={}",
        snapshot.latest_reading.is_some(),
        snapshot.alerts.len(),
        active
    );

    let view = display::render(&snapshot, &state.principal, active);
    Json(DashboardResponse {
        active,
        snapshot,
        view,
    })
}
