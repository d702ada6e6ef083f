//! Data models for Silent Watch readings and alerts.
//!
//! Field names match the `sensor_readings` and `risk_alerts` columns so the
//! same types travel unchanged through Postgres rows, PostgREST JSON and the
//! dashboard API.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---

/// The operator that owns readings and alerts.
///
/// Passed explicitly into the simulator and poller; nothing in the crate
/// reads the operator from global state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    // ---
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl Principal {
    // ---
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// A persisted sensor sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    // ---
    pub id: Uuid,
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub pir_motion: bool,
    pub sound_level: u16,
    pub temperature: f64,
    pub humidity: f64,
    pub gas_level: u16,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `sensor_readings`; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSensorReading {
    // ---
    pub user_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub pir_motion: bool,
    pub sound_level: u16,
    pub temperature: f64,
    pub humidity: f64,
    pub gas_level: u16,
    pub location: String,
}

/// Three-tier banding of a risk score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    // ---
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(RiskLevel::Low),
            "MEDIUM" => Ok(RiskLevel::Medium),
            "HIGH" => Ok(RiskLevel::High),
            other => Err(format!("unknown risk level '{other}'")),
        }
    }
}

/// Threshold rules that fired for a reading.
///
/// A field is `Some` only if its rule fired. Absent fields are left out of
/// the serialized object, so key presence is preserved across the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    // ---
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<u16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl RiskFactors {
    // ---
    pub fn is_empty(&self) -> bool {
        self.motion.is_none()
            && self.sound.is_none()
            && self.gas.is_none()
            && self.temperature.is_none()
    }
}

/// A persisted risk alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAlert {
    // ---
    pub id: Uuid,
    pub user_id: Uuid,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub factors: RiskFactors,
    pub alert_message: String,
    pub resolved: bool,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `risk_alerts`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewRiskAlert {
    // ---
    pub user_id: Uuid,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    pub factors: RiskFactors,
    pub alert_message: String,
    pub resolved: bool,
}
