//! Synthetic sensor readings and the per-tick persist-then-score flow.
//!
//! A tick writes one reading, scores it, and writes an alert when the score
//! clears the floor. Store failures end the tick early; nothing is retried
//! and nothing reaches the HTTP caller. The outcome is returned for logging.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use rand::Rng;

use crate::models::{NewSensorReading, Principal, RiskAlert};
use crate::scorer::{self, RiskAssessment};
use crate::store::SensorStore;

// ---

pub const DEFAULT_LOCATION: &str = "Zone-A";

/// Produces readings in the value ranges the physical sensors report.
#[derive(Debug, Clone)]
pub struct ReadingGenerator {
    // ---
    location: String,
}

impl ReadingGenerator {
    // ---
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, principal: &Principal) -> NewSensorReading {
        // ---
        NewSensorReading {
            user_id: principal.user_id,
            timestamp: Utc::now(),
            pir_motion: rng.gen_bool(0.3),
            sound_level: rng.gen_range(0..=1023),
            temperature: rng.gen_range(20.0..35.0),
            humidity: rng.gen_range(40.0..80.0),
            gas_level: rng.gen_range(0..=299),
            location: self.location.clone(),
        }
    }

    /// Same as [`generate`](Self::generate) with the thread-local RNG.
    pub fn generate_random(&self, principal: &Principal) -> NewSensorReading {
        let mut rng = rand::thread_rng();
        self.generate(&mut rng, principal)
    }
}

impl Default for ReadingGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_LOCATION)
    }
}

/// What a single simulation tick ended up persisting.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The reading insert failed; scoring was skipped.
    ReadingDropped,
    /// Reading stored; score at or below the alert floor.
    Quiet(RiskAssessment),
    /// Reading and alert stored.
    AlertRaised(RiskAlert),
    /// Reading stored; the alert insert failed.
    AlertDropped(RiskAssessment),
}

/// Persist `reading`, score it, and persist an alert if warranted.
pub async fn run_tick(
    store: &dyn SensorStore,
    principal: &Principal,
    reading: NewSensorReading,
) -> TickOutcome {
    // ---
    let stored = match store.insert_reading(&reading).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!("Reading insert failed, skipping scoring: {}", e);
            return TickOutcome::ReadingDropped;
        }
    };

    let assessment = scorer::assess(&reading);
    tracing::debug!(
        reading_id = %stored.id,
        score = assessment.score,
        level = %assessment.level,
        "Scored reading"
    );

    let Some(alert) = assessment.to_alert(principal) else {
        return TickOutcome::Quiet(assessment);
    };

    match store.insert_alert(&alert).await {
        Ok(stored_alert) => {
            tracing::info!(
                "{} alert raised (score {}): {}",
                stored_alert.risk_level,
                stored_alert.risk_score,
                stored_alert.alert_message
            );
            TickOutcome::AlertRaised(stored_alert)
        }
        Err(e) => {
            tracing::warn!("Alert insert failed, dropping alert: {}", e);
            TickOutcome::AlertDropped(assessment)
        }
    }
}

/// The dashboard's ACTIVE/IDLE switch.
#[derive(Debug, Default)]
pub struct SimulationControl {
    // ---
    active: AtomicBool,
}

impl SimulationControl {
    // ---
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip to active. Returns false if a simulation was already active.
    pub fn try_start(&self) -> bool {
        self.active
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// Flip to idle. Returns whether it was active.
    pub fn stop(&self) -> bool {
        self.active.swap(false, Ordering::SeqCst)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
