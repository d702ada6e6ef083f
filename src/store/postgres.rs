//! PostgreSQL backend for the sensor store.
//!
//! Integer columns are `INTEGER` in the schema, so rows are read into
//! `i32`-typed structs and range-checked into the domain types.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use super::{SensorStore, StoreError, StoreResult};
use crate::models::{
    NewRiskAlert, NewSensorReading, RiskAlert, RiskFactors, RiskLevel, SensorReading,
};

// ---

#[derive(Debug, Clone)]
pub struct PgStore {
    // ---
    pool: PgPool,
}

impl PgStore {
    // ---
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ReadingRow {
    // ---
    id: Uuid,
    user_id: Uuid,
    timestamp: DateTime<Utc>,
    pir_motion: bool,
    sound_level: i32,
    temperature: f64,
    humidity: f64,
    gas_level: i32,
    location: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct AlertRow {
    // ---
    id: Uuid,
    user_id: Uuid,
    risk_level: String,
    risk_score: i32,
    factors: Json<RiskFactors>,
    alert_message: String,
    resolved: bool,
    created_at: DateTime<Utc>,
}

fn narrow<T, S>(column: &str, value: S) -> StoreResult<T>
where
    T: TryFrom<S>,
    S: Copy + std::fmt::Display,
{
    T::try_from(value).map_err(|_| StoreError::Decode(format!("{column} out of range: {value}")))
}

impl TryFrom<ReadingRow> for SensorReading {
    type Error = StoreError;

    fn try_from(row: ReadingRow) -> StoreResult<Self> {
        // ---
        Ok(SensorReading {
            id: row.id,
            user_id: row.user_id,
            timestamp: row.timestamp,
            pir_motion: row.pir_motion,
            sound_level: narrow("sound_level", row.sound_level)?,
            temperature: row.temperature,
            humidity: row.humidity,
            gas_level: narrow("gas_level", row.gas_level)?,
            location: row.location,
            created_at: row.created_at,
        })
    }
}

impl TryFrom<AlertRow> for RiskAlert {
    type Error = StoreError;

    fn try_from(row: AlertRow) -> StoreResult<Self> {
        // ---
        Ok(RiskAlert {
            id: row.id,
            user_id: row.user_id,
            risk_level: row
                .risk_level
                .parse::<RiskLevel>()
                .map_err(StoreError::Decode)?,
            risk_score: narrow("risk_score", row.risk_score)?,
            factors: row.factors.0,
            alert_message: row.alert_message,
            resolved: row.resolved,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl SensorStore for PgStore {
    async fn insert_reading(&self, reading: &NewSensorReading) -> StoreResult<SensorReading> {
        // ---
        let row: ReadingRow = sqlx::query_as(
            r#"
            INSERT INTO sensor_readings (
                user_id, "timestamp", pir_motion, sound_level,
                temperature, humidity, gas_level, location
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(reading.user_id)
        .bind(reading.timestamp)
        .bind(reading.pir_motion)
        .bind(i32::from(reading.sound_level))
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(i32::from(reading.gas_level))
        .bind(&reading.location)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn insert_alert(&self, alert: &NewRiskAlert) -> StoreResult<RiskAlert> {
        // ---
        let risk_score: i32 = narrow("risk_score", alert.risk_score)?;

        let row: AlertRow = sqlx::query_as(
            r#"
            INSERT INTO risk_alerts (
                user_id, risk_level, risk_score, factors, alert_message, resolved
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(alert.user_id)
        .bind(alert.risk_level.as_str())
        .bind(risk_score)
        .bind(Json(&alert.factors))
        .bind(&alert.alert_message)
        .bind(alert.resolved)
        .fetch_one(&self.pool)
        .await?;

        row.try_into()
    }

    async fn latest_reading(&self, user_id: Uuid) -> StoreResult<Option<SensorReading>> {
        // ---
        let row: Option<ReadingRow> = sqlx::query_as(
            r#"
            SELECT * FROM sensor_readings
            WHERE user_id = $1
            ORDER BY "timestamp" DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(SensorReading::try_from).transpose()
    }

    async fn recent_alerts(&self, user_id: Uuid, limit: usize) -> StoreResult<Vec<RiskAlert>> {
        // ---
        let limit: i64 = narrow("limit", limit)?;

        let rows: Vec<AlertRow> = sqlx::query_as(
            r#"
            SELECT * FROM risk_alerts
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RiskAlert::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    fn reading_row(sound_level: i32) -> ReadingRow {
        // ---
        ReadingRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            pir_motion: true,
            sound_level,
            temperature: 24.5,
            humidity: 61.0,
            gas_level: 120,
            location: "Zone-A".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_reading_row_conversion() {
        // ---
        let reading = SensorReading::try_from(reading_row(812)).unwrap();
        assert_eq!(reading.sound_level, 812);
        assert_eq!(reading.gas_level, 120);
        assert!(reading.pir_motion);
    }

    #[test]
    fn test_negative_sound_level_is_rejected() {
        // ---
        let err = SensorReading::try_from(reading_row(-1)).unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
        assert!(err.to_string().contains("sound_level"));
    }

    #[test]
    fn test_alert_row_conversion() {
        // ---
        let row = AlertRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            risk_level: "HIGH".to_string(),
            risk_score: 60,
            factors: Json(RiskFactors {
                motion: Some(true),
                gas: Some(250),
                ..Default::default()
            }),
            alert_message: "Critical threat detected - immediate attention required".to_string(),
            resolved: false,
            created_at: Utc::now(),
        };

        let alert = RiskAlert::try_from(row).unwrap();
        assert_eq!(alert.risk_level, RiskLevel::High);
        assert_eq!(alert.risk_score, 60);
        assert_eq!(alert.factors.gas, Some(250));
    }

    #[test]
    fn test_unknown_risk_level_is_rejected() {
        // ---
        let row = AlertRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            risk_level: "SEVERE".to_string(),
            risk_score: 90,
            factors: Json(RiskFactors::default()),
            alert_message: String::new(),
            resolved: false,
            created_at: Utc::now(),
        };

        assert!(matches!(
            RiskAlert::try_from(row),
            Err(StoreError::Decode(_))
        ));
    }
}
