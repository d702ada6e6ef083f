//! Supabase (PostgREST) backend for the sensor store.
//!
//! Every request carries the project `apikey` header and a bearer token. The
//! token is the operator's session JWT when one is configured, otherwise the
//! anon key; row-level security on the hosted tables decides what it sees.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use super::{SensorStore, StoreError, StoreResult};
use crate::models::{NewRiskAlert, NewSensorReading, RiskAlert, SensorReading};

// ---

const READINGS_TABLE: &str = "sensor_readings";
const ALERTS_TABLE: &str = "risk_alerts";

#[derive(Debug, Clone)]
pub struct RestStore {
    // ---
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: String,
}

impl RestStore {
    // ---
    pub fn new(base_url: &str, anon_key: &str, access_token: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            access_token: access_token.unwrap_or(anon_key).to_string(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    async fn insert<T, R>(&self, table: &str, body: &T) -> StoreResult<R>
    where
        T: Serialize + Sync,
        R: DeserializeOwned,
    {
        // ---
        let url = self.table_url(table);
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;

        let rows: Vec<R> = decode(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode(format!("insert into {table} returned no rows")))
    }

    async fn select<R>(&self, table: &str, query: &[(&str, String)]) -> StoreResult<Vec<R>>
    where
        R: DeserializeOwned,
    {
        // ---
        let url = self.table_url(table);
        tracing::debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.access_token)
            .query(query)
            .send()
            .await?;

        decode(response).await
    }
}

/// PostgREST filter for one user's rows, newest first.
fn owner_query(user_id: Uuid, order_column: &str, limit: usize) -> Vec<(&'static str, String)> {
    // ---
    vec![
        ("select", "*".to_string()),
        ("user_id", format!("eq.{user_id}")),
        ("order", format!("{order_column}.desc")),
        ("limit", limit.to_string()),
    ]
}

async fn decode<R: DeserializeOwned>(response: Response) -> StoreResult<Vec<R>> {
    // ---
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(StoreError::Status {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json().await?)
}

#[async_trait]
impl SensorStore for RestStore {
    async fn insert_reading(&self, reading: &NewSensorReading) -> StoreResult<SensorReading> {
        self.insert(READINGS_TABLE, reading).await
    }

    async fn insert_alert(&self, alert: &NewRiskAlert) -> StoreResult<RiskAlert> {
        self.insert(ALERTS_TABLE, alert).await
    }

    async fn latest_reading(&self, user_id: Uuid) -> StoreResult<Option<SensorReading>> {
        // ---
        let rows: Vec<SensorReading> = self
            .select(READINGS_TABLE, &owner_query(user_id, "timestamp", 1))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn recent_alerts(&self, user_id: Uuid, limit: usize) -> StoreResult<Vec<RiskAlert>> {
        self.select(ALERTS_TABLE, &owner_query(user_id, "created_at", limit))
            .await
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_table_url_trims_trailing_slash() {
        // ---
        let store = RestStore::new("https://demo.supabase.co/", "anon", None);
        assert_eq!(
            store.table_url(READINGS_TABLE),
            "https://demo.supabase.co/rest/v1/sensor_readings"
        );
    }

    #[test]
    fn test_access_token_defaults_to_anon_key() {
        // ---
        let store = RestStore::new("https://demo.supabase.co", "anon", None);
        assert_eq!(store.access_token, "anon");

        let store = RestStore::new("https://demo.supabase.co", "anon", Some("user-jwt"));
        assert_eq!(store.access_token, "user-jwt");
        assert_eq!(store.anon_key, "anon");
    }

    #[test]
    fn test_owner_query() {
        // ---
        let user = Uuid::nil();
        let query = owner_query(user, "created_at", 5);

        assert_eq!(
            query,
            vec![
                ("select", "*".to_string()),
                ("user_id", "eq.00000000-0000-0000-0000-000000000000".to_string()),
                ("order", "created_at.desc".to_string()),
                ("limit", "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_alert_row_from_postgrest_json() {
        // ---
        let body = r#"[{
            "id": "7b1c1f0e-5d7a-4f57-9a43-0d7c6f0f2a11",
            "user_id": "00000000-0000-0000-0000-000000000000",
            "risk_level": "MEDIUM",
            "risk_score": 55,
            "factors": {"motion": true, "sound": 750},
            "alert_message": "Suspicious activity detected - monitoring closely",
            "resolved": false,
            "created_at": "2025-06-01T12:00:00+00:00"
        }]"#;

        let rows: Vec<RiskAlert> = serde_json::from_str(body).unwrap();
        assert_eq!(rows[0].risk_score, 55);
        assert_eq!(rows[0].factors.sound, Some(750));
        assert_eq!(rows[0].factors.gas, None);
    }
}
