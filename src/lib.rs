//! Silent Watch: simulated IoT sensor monitoring with threshold risk alerts.
//!
//! Module map (EMBP: callers go through the re-exports below):
//! - `scorer`    – weighted threshold rules and LOW/MEDIUM/HIGH banding
//! - `simulator` – synthetic readings and the persist-then-score tick
//! - `poller`    – interval refresh of the dashboard snapshot
//! - `display`   – card/indicator view of a snapshot
//! - `store`     – Postgres, Supabase REST and in-memory backends
//! - `routes`    – axum HTTP surface

pub mod config;
pub mod display;
pub mod models;
pub mod poller;
pub mod routes;
pub mod schema;
pub mod scorer;
pub mod simulator;
pub mod state;
pub mod store;

pub use config::{Config, StoreBackend};
pub use models::{
    NewRiskAlert, NewSensorReading, Principal, RiskAlert, RiskFactors, RiskLevel, SensorReading,
};
pub use poller::{DashboardSnapshot, Poller, SnapshotHandle};
pub use scorer::{assess, RiskAssessment};
pub use simulator::{run_tick, ReadingGenerator, SimulationControl, TickOutcome};
pub use state::AppState;
pub use store::{MemoryStore, PgStore, RestStore, SensorStore, StoreError, StoreResult};
