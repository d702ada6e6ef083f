//! Threshold-based risk scoring for sensor readings.
//!
//! Four independent rules each add a fixed weight when they fire. The total
//! is banded into a [`RiskLevel`], and an alert is only warranted once the
//! total climbs above [`ALERT_FLOOR`].

use crate::models::{NewRiskAlert, NewSensorReading, Principal, RiskFactors, RiskLevel};

// ---

pub const MOTION_WEIGHT: u32 = 25;
pub const SOUND_WEIGHT: u32 = 30;
pub const GAS_WEIGHT: u32 = 35;
pub const TEMPERATURE_WEIGHT: u32 = 10;

/// Sound level above which the sound rule fires.
pub const SOUND_THRESHOLD: u16 = 700;
/// Gas level above which the gas rule fires.
pub const GAS_THRESHOLD: u16 = 200;
/// Temperature (°C) above which the temperature rule fires.
pub const TEMPERATURE_THRESHOLD: f64 = 30.0;

pub const MEDIUM_FLOOR: u32 = 30;
pub const HIGH_FLOOR: u32 = 60;

/// Scores at or below this value never produce an alert.
pub const ALERT_FLOOR: u32 = 20;

/// Result of scoring one reading.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskAssessment {
    // ---
    pub score: u32,
    pub level: RiskLevel,
    pub factors: RiskFactors,
}

impl RiskAssessment {
    // ---
    pub fn warrants_alert(&self) -> bool {
        self.score > ALERT_FLOOR
    }

    /// Build the alert row for this assessment, or `None` below the floor.
    pub fn to_alert(&self, principal: &Principal) -> Option<NewRiskAlert> {
        // ---
        if !self.warrants_alert() {
            return None;
        }

        Some(NewRiskAlert {
            user_id: principal.user_id,
            risk_level: self.level,
            risk_score: self.score,
            factors: self.factors.clone(),
            alert_message: alert_message(self.level).to_string(),
            resolved: false,
        })
    }
}

/// Evaluate every rule against `reading` and sum the weights that fired.
pub fn assess(reading: &NewSensorReading) -> RiskAssessment {
    // ---
    let mut score = 0;
    let mut factors = RiskFactors::default();

    if reading.pir_motion {
        score += MOTION_WEIGHT;
        factors.motion = Some(true);
    }
    if reading.sound_level > SOUND_THRESHOLD {
        score += SOUND_WEIGHT;
        factors.sound = Some(reading.sound_level);
    }
    if reading.gas_level > GAS_THRESHOLD {
        score += GAS_WEIGHT;
        factors.gas = Some(reading.gas_level);
    }
    if reading.temperature > TEMPERATURE_THRESHOLD {
        score += TEMPERATURE_WEIGHT;
        factors.temperature = Some(reading.temperature);
    }

    RiskAssessment {
        score,
        level: classify(score),
        factors,
    }
}

pub fn classify(score: u32) -> RiskLevel {
    // ---
    if score >= HIGH_FLOOR {
        RiskLevel::High
    } else if score >= MEDIUM_FLOOR {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Fixed operator-facing message for each level.
pub fn alert_message(level: RiskLevel) -> &'static str {
    // ---
    match level {
        RiskLevel::Low => "Minor environmental anomaly detected",
        RiskLevel::Medium => "Suspicious activity detected - monitoring closely",
        RiskLevel::High => "Critical threat detected - immediate attention required",
    }
}
