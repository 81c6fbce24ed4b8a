//! Alert history feed.
//!
//! Holds the prediction alerts shown to operators. Any unacknowledged
//! critical alert means an evacuation advisory should be raised.

use serde::{Deserialize, Serialize};

use rockguard_core::error::AppError;
use rockguard_core::result::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

/// One entry in the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRecord {
    pub id: String,
    /// Wall-clock time as displayed, `HH:MM:SS`.
    pub timestamp: String,
    #[serde(rename = "type")]
    pub severity: AlertSeverity,
    pub sector: String,
    pub message: String,
    pub acknowledged: bool,
}

/// Ordered alert history, newest first.
#[derive(Debug, Clone, Default)]
pub struct AlertFeed {
    alerts: Vec<AlertRecord>,
}

impl AlertFeed {
    pub fn new(alerts: Vec<AlertRecord>) -> Self {
        Self { alerts }
    }

    /// The demonstration history a fresh deployment starts with.
    pub fn seeded() -> Self {
        let record = |id: &str, timestamp: &str, severity, sector: &str, message: &str, acknowledged| {
            AlertRecord {
                id: id.to_string(),
                timestamp: timestamp.to_string(),
                severity,
                sector: sector.to_string(),
                message: message.to_string(),
                acknowledged,
            }
        };

        Self::new(vec![
            record(
                "ALT-001",
                "14:32:08",
                AlertSeverity::Critical,
                "C1",
                "AI model predicts 91% rockfall probability - Crest Zone. Feature: slope angle + weathering grade",
                false,
            ),
            record(
                "ALT-002",
                "14:28:45",
                AlertSeverity::Critical,
                "A1",
                "Prediction confidence spike - North Wall. RockNet-v4 output: 87% risk, validated by ensemble",
                false,
            ),
            record(
                "ALT-003",
                "14:15:22",
                AlertSeverity::Warning,
                "B1",
                "Risk trend increasing - South Face. Model predicts escalation within 48hr window",
                true,
            ),
            record(
                "ALT-004",
                "13:58:11",
                AlertSeverity::Warning,
                "C2",
                "Historical rainfall pattern match detected - Haul Road. Similar to 2019 incident dataset",
                true,
            ),
            record(
                "ALT-005",
                "13:42:33",
                AlertSeverity::Info,
                "A2",
                "Model retraining complete - East Bench sector. Accuracy improved: 93.1% to 94.7%",
                true,
            ),
            record(
                "ALT-006",
                "13:30:05",
                AlertSeverity::Warning,
                "A1",
                "Anomaly detected in input features - North Wall. Data quality check recommended",
                true,
            ),
            record(
                "ALT-007",
                "12:55:18",
                AlertSeverity::Info,
                "B2",
                "New dataset batch ingested - West Ramp. 2,847 samples added to training pipeline",
                true,
            ),
        ])
    }

    pub fn list(&self) -> &[AlertRecord] {
        &self.alerts
    }

    /// Mark an alert acknowledged. Acknowledging twice is harmless.
    pub fn acknowledge(&mut self, id: &str) -> AppResult<&AlertRecord> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| AppError::not_found(format!("Alert '{id}' not found")))?;

        if !alert.acknowledged {
            alert.acknowledged = true;
            tracing::info!(alert_id = %id, "Alert acknowledged");
        }
        Ok(alert)
    }

    /// Unacknowledged critical alerts.
    pub fn critical_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.severity == AlertSeverity::Critical && !a.acknowledged)
            .count()
    }

    /// Whether an evacuation advisory should be on screen.
    pub fn advisory_active(&self) -> bool {
        self.critical_count() > 0
    }
}
