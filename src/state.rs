//! Shared application state handed to every route.

use std::sync::Arc;

use crate::models::Principal;
use crate::poller::SnapshotHandle;
use crate::simulator::{ReadingGenerator, SimulationControl};
use crate::store::SensorStore;

// ---

#[derive(Clone)]
pub struct AppState {
    // ---
    pub store: Arc<dyn SensorStore>,
    pub principal: Principal,
    pub snapshot: SnapshotHandle,
    pub simulation: Arc<SimulationControl>,
    pub generator: Arc<ReadingGenerator>,
}

impl AppState {
    // ---
    pub fn new(store: Arc<dyn SensorStore>, principal: Principal, generator: ReadingGenerator) -> Self {
        Self {
            store,
            principal,
            snapshot: SnapshotHandle::default(),
            simulation: Arc::new(SimulationControl::new()),
            generator: Arc::new(generator),
        }
    }
}
