//! Route gateway (EMBP): each sibling module exports a subrouter and this
//! module merges them and attaches the shared state.

use axum::Router;

use crate::AppState;

mod dashboard;
mod health;
mod simulation;

// ---

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(simulation::router())
        .merge(health::router())
        .with_state(state)
}
