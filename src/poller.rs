//! Timer-driven refresh of the dashboard snapshot.
//!
//! Each tick reads the operator's newest reading and last few alerts from
//! the store and swaps them into the shared [`DashboardSnapshot`]. A failed
//! fetch leaves that half of the snapshot as it was.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::models::{Principal, RiskAlert, SensorReading};
use crate::store::SensorStore;

// ---

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Number of alerts kept in the history.
pub const ALERT_HISTORY_LIMIT: usize = 5;

/// What the dashboard currently shows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    // ---
    pub latest_reading: Option<SensorReading>,
    pub alerts: Vec<RiskAlert>,
    pub current_alert: Option<RiskAlert>,
    pub refreshed_at: Option<DateTime<Utc>>,
}

pub type SnapshotHandle = Arc<RwLock<DashboardSnapshot>>;

/// First unresolved alert, else the newest one, else none.
pub fn select_current_alert(alerts: &[RiskAlert]) -> Option<RiskAlert> {
    // ---
    alerts
        .iter()
        .find(|a| !a.resolved)
        .or_else(|| alerts.first())
        .cloned()
}

pub struct Poller {
    // ---
    store: Arc<dyn SensorStore>,
    principal: Principal,
    snapshot: SnapshotHandle,
    interval: Duration,
}

impl Poller {
    // ---
    pub fn new(
        store: Arc<dyn SensorStore>,
        principal: Principal,
        snapshot: SnapshotHandle,
        interval: Duration,
    ) -> Self {
        Self {
            store,
            principal,
            snapshot,
            interval,
        }
    }

    /// Fetch once and replace the snapshot.
    pub async fn refresh(&self) {
        // ---
        let user_id = self.principal.user_id;

        let reading = match self.store.latest_reading(user_id).await {
            Ok(reading) => reading,
            Err(e) => {
                tracing::warn!("Failed to load latest reading: {}", e);
                None
            }
        };

        let alerts = match self.store.recent_alerts(user_id, ALERT_HISTORY_LIMIT).await {
            Ok(alerts) => Some(alerts),
            Err(e) => {
                tracing::warn!("Failed to load recent alerts: {}", e);
                None
            }
        };

        let mut snapshot = self.snapshot.write().await;
        let mut next = snapshot.clone();

        if let Some(reading) = reading {
            next.latest_reading = Some(reading);
        }
        if let Some(alerts) = alerts {
            next.current_alert = select_current_alert(&alerts);
            next.alerts = alerts;
        }
        next.refreshed_at = Some(Utc::now());

        tracing::debug!(
            "Snapshot refreshed: reading={} alerts={}",
            next.latest_reading.is_some(),
            next.alerts.len()
        );
        *snapshot = next;
    }

    /// Refresh immediately, then on every interval until `cancel` fires.
    pub async fn run(self, cancel: CancellationToken) {
        // ---
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Poller cancelled");
                    break;
                }
                _ = ticker.tick() => self.refresh().await,
            }
        }
    }

    pub fn spawn(self, cancel: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(cancel))
    }
}
