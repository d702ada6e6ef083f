//! Process-local store backed by vectors.
//!
//! Rows are lost on restart. Ordering ties (same timestamp) resolve to the
//! most recently inserted row, which is what a serial-id tiebreak would give.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{SensorStore, StoreResult};
use crate::models::{NewRiskAlert, NewSensorReading, RiskAlert, SensorReading};

// ---

#[derive(Debug, Default)]
pub struct MemoryStore {
    // ---
    readings: RwLock<Vec<SensorReading>>,
    alerts: RwLock<Vec<RiskAlert>>,
}

impl MemoryStore {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn reading_count(&self) -> usize {
        self.readings.read().await.len()
    }

    pub async fn alert_count(&self) -> usize {
        self.alerts.read().await.len()
    }
}

#[async_trait]
impl SensorStore for MemoryStore {
    async fn insert_reading(&self, reading: &NewSensorReading) -> StoreResult<SensorReading> {
        // ---
        let stored = SensorReading {
            id: Uuid::new_v4(),
            user_id: reading.user_id,
            timestamp: reading.timestamp,
            pir_motion: reading.pir_motion,
            sound_level: reading.sound_level,
            temperature: reading.temperature,
            humidity: reading.humidity,
            gas_level: reading.gas_level,
            location: reading.location.clone(),
            created_at: Utc::now(),
        };

        self.readings.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn insert_alert(&self, alert: &NewRiskAlert) -> StoreResult<RiskAlert> {
        // ---
        let stored = RiskAlert {
            id: Uuid::new_v4(),
            user_id: alert.user_id,
            risk_level: alert.risk_level,
            risk_score: alert.risk_score,
            factors: alert.factors.clone(),
            alert_message: alert.alert_message.clone(),
            resolved: alert.resolved,
            created_at: Utc::now(),
        };

        self.alerts.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn latest_reading(&self, user_id: Uuid) -> StoreResult<Option<SensorReading>> {
        // ---
        let readings = self.readings.read().await;

        // `max_by_key` keeps the last maximum, i.e. the latest insert on ties.
        Ok(readings
            .iter()
            .filter(|r| r.user_id == user_id)
            .max_by_key(|r| r.timestamp)
            .cloned())
    }

    async fn recent_alerts(&self, user_id: Uuid, limit: usize) -> StoreResult<Vec<RiskAlert>> {
        // ---
        let alerts = self.alerts.read().await;

        let mut owned: Vec<RiskAlert> = alerts
            .iter()
            .rev()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        owned.truncate(limit);

        Ok(owned)
    }
}
