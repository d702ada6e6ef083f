//! Remote store gateway for readings and alerts.
//!
//! Both tables are insert-only from this service's point of view and are
//! always queried per owning user, newest first. Backends:
//! - [`PgStore`]: PostgreSQL through `sqlx`
//! - [`RestStore`]: a Supabase/PostgREST endpoint through `reqwest`
//! - [`MemoryStore`]: process-local, for local runs and tests

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewRiskAlert, NewSensorReading, RiskAlert, SensorReading};

mod memory;
mod postgres;
mod rest;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use rest::RestStore;

// ---

/// Errors surfaced by a store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database driver failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Transport failure talking to the REST endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// REST endpoint answered with a non-success status
    #[error("Unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// A row could not be mapped onto the domain types
    #[error("Decode error: {0}")]
    Decode(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence seam for the simulator and the poller.
#[async_trait]
#[cfg_attr(test, mockall::automock)]
pub trait SensorStore: Send + Sync {
    /// Insert one reading and return the stored row.
    async fn insert_reading(&self, reading: &NewSensorReading) -> StoreResult<SensorReading>;

    /// Insert one alert and return the stored row.
    async fn insert_alert(&self, alert: &NewRiskAlert) -> StoreResult<RiskAlert>;

    /// Most recent reading for `user_id` by capture timestamp.
    async fn latest_reading(&self, user_id: Uuid) -> StoreResult<Option<SensorReading>>;

    /// Up to `limit` alerts for `user_id`, newest first.
    async fn recent_alerts(&self, user_id: Uuid, limit: usize) -> StoreResult<Vec<RiskAlert>>;
}
