// src/routes/simulation.rs
//! Simulation start/stop endpoints for the Silent Watch backend.
//!
//! `POST /simulation/start` runs one persist-then-score tick when the system
//! is idle. `POST /simulation/stop` returns it to idle. Store failures stay
//! in the logs. Follows the Explicit Module Boundary Pattern (EMBP):
//! - Internal to this file: the handlers and their response type
//! - Exports to the gateway (`mod.rs`): a subrouter with both routes

use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::simulator::{run_tick, TickOutcome};
use crate::AppState;

// ---

/// Reply to the start/stop buttons. Store failures are never reported here.
#[derive(Debug, Serialize)]
pub struct SimulationResponse {
    // ---
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub started: Option<bool>,
}

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/simulation/start", post(start))
        .route("/simulation/stop", post(stop))
}

/// Handle `POST /simulation/start`.
///
/// No-op while a simulation is already active. Otherwise marks the system
/// active and runs exactly one tick before replying.
async fn start(State(state): State<AppState>) -> impl IntoResponse {
    // ---
    if !state.simulation.try_start() {
        debug!("POST /simulation/start - already active");
        return (
            StatusCode::ACCEPTED,
            Json(SimulationResponse {
                active: true,
                started: Some(false),
            }),
        );
    }

    info!("POST /simulation/start - generating reading");
    let reading = state.generator.generate_random(&state.principal);

    match run_tick(state.store.as_ref(), &state.principal, reading).await {
        TickOutcome::ReadingDropped => debug!("Tick ended without a stored reading"),
        TickOutcome::Quiet(assessment) => {
            debug!("Tick quiet (score {})", assessment.score)
        }
        TickOutcome::AlertRaised(alert) => debug!("Tick raised alert {}", alert.id),
        TickOutcome::AlertDropped(assessment) => {
            debug!("Tick lost a {} alert", assessment.level)
        }
    }

    (
        StatusCode::ACCEPTED,
        Json(SimulationResponse {
            active: true,
            started: Some(true),
        }),
    )
}

/// Handle `POST /simulation/stop`.
async fn stop(State(state): State<AppState>) -> Json<SimulationResponse> {
    // ---
    let was_active = state.simulation.stop();
    info!("POST /simulation/stop - was_active={}", was_active);

    Json(SimulationResponse {
        active: false,
        started: None,
    })
}
