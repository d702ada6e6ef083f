//! Database schema management for `silent-watch`.
//!
//! Ensures the `sensor_readings` and `risk_alerts` tables exist before the
//! poller or the simulation routes touch them. Applied once on startup from
//! `main.rs` when the Postgres backend is selected (EMBP: single gateway call).

use anyhow::Result;
use sqlx::PgPool;

// ---

/// Create or update the database schema (idempotent).
///
/// `gen_random_uuid()` is built in from PostgreSQL 13 onward. Safe to call on
/// every startup; no-op if objects already exist.
pub async fn create_schema(pool: &PgPool) -> Result<()> {
    // ---
    let mut tx = pool.begin().await?;

    // One row per simulation tick
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sensor_readings (
            id           UUID        PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id      UUID        NOT NULL,
            "timestamp"  TIMESTAMPTZ NOT NULL DEFAULT now(),
            pir_motion   BOOLEAN     NOT NULL DEFAULT false,
            sound_level  INTEGER     NOT NULL CHECK (sound_level BETWEEN 0 AND 1023),
            temperature  DOUBLE PRECISION NOT NULL,
            humidity     DOUBLE PRECISION NOT NULL,
            gas_level    INTEGER     NOT NULL CHECK (gas_level >= 0),
            location     TEXT        NOT NULL DEFAULT 'Zone-A',
            created_at   TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Alerts are only written above the score floor
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS risk_alerts (
            id            UUID        PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id       UUID        NOT NULL,
            risk_level    TEXT        NOT NULL CHECK (risk_level IN ('LOW', 'MEDIUM', 'HIGH')),
            risk_score    INTEGER     NOT NULL,
            factors       JSONB       NOT NULL DEFAULT '{}'::jsonb,
            alert_message TEXT        NOT NULL,
            resolved      BOOLEAN     NOT NULL DEFAULT false,
            created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
        );
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // Both poll queries filter by owner and read newest first
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_sensor_readings_user_timestamp
            ON sensor_readings (user_id, "timestamp" DESC);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_risk_alerts_user_created_at
            ON risk_alerts (user_id, created_at DESC);
        "#,
    )
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}
