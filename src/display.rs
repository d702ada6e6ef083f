//! Presentational mapping from the snapshot to dashboard cards.
//!
//! Nothing here talks to the store. Colours and labels are the lookup tables
//! the browser dashboard renders; thresholds come from [`crate::scorer`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Principal, RiskAlert, RiskLevel, SensorReading};
use crate::poller::DashboardSnapshot;
use crate::scorer::{GAS_THRESHOLD, SOUND_THRESHOLD, TEMPERATURE_THRESHOLD};

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardColor {
    Red,
    Yellow,
    Green,
    Slate,
}

impl From<RiskLevel> for CardColor {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => CardColor::Red,
            RiskLevel::Medium => CardColor::Yellow,
            RiskLevel::Low => CardColor::Green,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorCard {
    // ---
    pub title: &'static str,
    pub value: String,
    pub color: CardColor,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskIndicator {
    // ---
    pub level: String,
    pub color: CardColor,
    pub message: String,
    pub score: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors_title: Option<&'static str>,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertHistoryEntry {
    // ---
    pub id: Uuid,
    pub risk_level: RiskLevel,
    pub badge: CardColor,
    pub message: String,
    pub score: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertHistory {
    // ---
    pub entries: Vec<AlertHistoryEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatorView {
    // ---
    pub email: Option<String>,
    pub role: &'static str,
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    // ---
    pub operator: OperatorView,
    pub system_status: SensorCard,
    pub risk: RiskIndicator,
    pub sensors: Vec<SensorCard>,
    pub history: AlertHistory,
}

pub fn render(snapshot: &DashboardSnapshot, principal: &Principal, active: bool) -> DashboardView {
    // ---
    DashboardView {
        operator: OperatorView {
            email: principal.email.clone(),
            role: "System Operator",
        },
        system_status: system_status_card(active),
        risk: risk_indicator(snapshot.current_alert.as_ref()),
        sensors: snapshot
            .latest_reading
            .as_ref()
            .map(sensor_cards)
            .unwrap_or_default(),
        history: alert_history(&snapshot.alerts),
    }
}

pub fn system_status_card(active: bool) -> SensorCard {
    // ---
    SensorCard {
        title: "System Status",
        value: if active { "ACTIVE" } else { "IDLE" }.to_string(),
        color: if active {
            CardColor::Green
        } else {
            CardColor::Slate
        },
    }
}

pub fn sensor_cards(reading: &SensorReading) -> Vec<SensorCard> {
    // ---
    let alarm = |fired: bool, hot: CardColor| if fired { hot } else { CardColor::Green };

    let gas_alarm = reading.gas_level > GAS_THRESHOLD;

    vec![
        SensorCard {
            title: "Motion Detection",
            value: if reading.pir_motion { "DETECTED" } else { "CLEAR" }.to_string(),
            color: alarm(reading.pir_motion, CardColor::Red),
        },
        SensorCard {
            title: "Sound Level",
            value: format!("{} dB", reading.sound_level),
            color: alarm(reading.sound_level > SOUND_THRESHOLD, CardColor::Yellow),
        },
        SensorCard {
            title: "Temperature",
            value: format!("{:.1}°C", reading.temperature),
            color: alarm(reading.temperature > TEMPERATURE_THRESHOLD, CardColor::Red),
        },
        SensorCard {
            title: "Gas/Smoke",
            value: if gas_alarm { "ALERT" } else { "NORMAL" }.to_string(),
            color: alarm(gas_alarm, CardColor::Red),
        },
    ]
}

pub fn risk_indicator(alert: Option<&RiskAlert>) -> RiskIndicator {
    // ---
    let Some(alert) = alert else {
        return RiskIndicator {
            level: "NO DATA".to_string(),
            color: CardColor::Slate,
            message: "Waiting for sensor data...".to_string(),
            score: None,
            factors_title: None,
            factors: Vec::new(),
        };
    };

    // Motion lists on a true value; the other three list on key presence.
    let mut factors = Vec::new();
    if alert.factors.motion == Some(true) {
        factors.push("Unauthorized motion detected".to_string());
    }
    if let Some(sound) = alert.factors.sound {
        factors.push(format!("Abnormal sound level: {sound} dB"));
    }
    if let Some(gas) = alert.factors.gas {
        factors.push(format!("Gas/smoke detected: {gas} ppm"));
    }
    if let Some(temperature) = alert.factors.temperature {
        factors.push(format!("High temperature: {temperature:.1}°C"));
    }

    RiskIndicator {
        level: format!("{} RISK", alert.risk_level),
        color: alert.risk_level.into(),
        message: alert.alert_message.clone(),
        score: Some(alert.risk_score),
        factors_title: (!alert.factors.is_empty()).then_some("Contributing Factors"),
        factors,
    }
}

pub fn alert_history(alerts: &[RiskAlert]) -> AlertHistory {
    // ---
    let entries: Vec<AlertHistoryEntry> = alerts
        .iter()
        .map(|a| AlertHistoryEntry {
            id: a.id,
            risk_level: a.risk_level,
            badge: a.risk_level.into(),
            message: a.alert_message.clone(),
            score: a.risk_score,
            created_at: a.created_at,
        })
        .collect();

    let empty_message = entries.is_empty().then_some("No alerts recorded yet");

    AlertHistory {
        entries,
        empty_message,
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;
    use crate::models::RiskFactors;

    fn reading(motion: bool, sound: u16, temperature: f64, gas: u16) -> SensorReading {
        // ---
        SensorReading {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            timestamp: Utc::now(),
            pir_motion: motion,
            sound_level: sound,
            temperature,
            humidity: 48.0,
            gas_level: gas,
            location: "Zone-A".to_string(),
            created_at: Utc::now(),
        }
    }

    fn alert(level: RiskLevel, score: u32, factors: RiskFactors) -> RiskAlert {
        // ---
        RiskAlert {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            risk_level: level,
            risk_score: score,
            factors,
            alert_message: crate::scorer::alert_message(level).to_string(),
            resolved: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_quiet_sensor_cards_are_green() {
        // ---
        let cards = sensor_cards(&reading(false, 700, 30.0, 200));

        let values: Vec<&str> = cards.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["CLEAR", "700 dB", "30.0°C", "NORMAL"]);
        assert!(cards.iter().all(|c| c.color == CardColor::Green));
    }

    #[test]
    fn test_alarming_sensor_cards() {
        // ---
        let cards = sensor_cards(&reading(true, 701, 31.26, 201));

        assert_eq!(cards[0].value, "DETECTED");
        assert_eq!(cards[0].color, CardColor::Red);
        assert_eq!(cards[1].color, CardColor::Yellow);
        assert_eq!(cards[2].value, "31.3°C");
        assert_eq!(cards[2].color, CardColor::Red);
        assert_eq!(cards[3].value, "ALERT");
        assert_eq!(cards[3].color, CardColor::Red);
    }

    #[test]
    fn test_no_alert_indicator() {
        // ---
        let indicator = risk_indicator(None);

        assert_eq!(indicator.level, "NO DATA");
        assert_eq!(indicator.color, CardColor::Slate);
        assert_eq!(indicator.message, "Waiting for sensor data...");
        assert!(indicator.score.is_none());
        assert!(indicator.factors_title.is_none());
    }

    #[test]
    fn test_indicator_without_factors_has_no_title() {
        // ---
        let indicator = risk_indicator(Some(&alert(RiskLevel::Low, 21, RiskFactors::default())));

        assert!(indicator.factors_title.is_none());
        assert!(indicator.factors.is_empty());
    }

    #[test]
    fn test_false_motion_factor_is_not_listed() {
        // ---
        let factors = RiskFactors {
            motion: Some(false),
            gas: Some(250),
            ..Default::default()
        };
        let indicator = risk_indicator(Some(&alert(RiskLevel::Medium, 35, factors)));

        assert_eq!(indicator.factors_title, Some("Contributing Factors"));
        assert_eq!(indicator.factors, vec!["Gas/smoke detected: 250 ppm".to_string()]);
    }

    #[test]
    fn test_indicator_lists_present_factors() {
        // ---
        let factors = RiskFactors {
            motion: Some(true),
            sound: Some(750),
            ..Default::default()
        };
        let indicator = risk_indicator(Some(&alert(RiskLevel::Medium, 55, factors)));

        assert_eq!(indicator.level, "MEDIUM RISK");
        assert_eq!(indicator.color, CardColor::Yellow);
        assert_eq!(indicator.score, Some(55));
        assert_eq!(indicator.factors_title, Some("Contributing Factors"));
        assert_eq!(
            indicator.factors,
            vec![
                "Unauthorized motion detected".to_string(),
                "Abnormal sound level: 750 dB".to_string(),
            ]
        );
    }

    #[test]
    fn test_indicator_formats_gas_and_temperature() {
        // ---
        let factors = RiskFactors {
            gas: Some(260),
            temperature: Some(33.333),
            ..Default::default()
        };
        let indicator = risk_indicator(Some(&alert(RiskLevel::Medium, 45, factors)));

        assert_eq!(
            indicator.factors,
            vec![
                "Gas/smoke detected: 260 ppm".to_string(),
                "High temperature: 33.3°C".to_string(),
            ]
        );
    }

    #[test]
    fn test_history_badges_and_empty_state() {
        // ---
        let empty = alert_history(&[]);
        assert!(empty.entries.is_empty());
        assert_eq!(empty.empty_message, Some("No alerts recorded yet"));

        let history = alert_history(&[
            alert(RiskLevel::High, 90, RiskFactors::default()),
            alert(RiskLevel::Low, 25, RiskFactors::default()),
        ]);
        assert!(history.empty_message.is_none());
        assert_eq!(history.entries[0].badge, CardColor::Red);
        assert_eq!(history.entries[1].badge, CardColor::Green);
    }

    #[test]
    fn test_render_without_reading_has_no_sensor_cards() {
        // ---
        let principal = Principal::new(Uuid::nil()).with_email("operator@example.com");
        let view = render(&DashboardSnapshot::default(), &principal, true);

        assert!(view.sensors.is_empty());
        assert_eq!(view.system_status.value, "ACTIVE");
        assert_eq!(view.system_status.color, CardColor::Green);
        assert_eq!(view.operator.email.as_deref(), Some("operator@example.com"));
        assert_eq!(view.risk.level, "NO DATA");
    }
}
