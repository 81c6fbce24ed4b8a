//! Response DTOs.

use serde::{Deserialize, Serialize};

use rockguard_alert::SessionSnapshot;
use rockguard_alert::feed::AlertRecord;
use rockguard_core::types::Recipient;

/// `POST /api/send-evacuation-alert` success body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendAlertResponse {
    pub success: bool,
    pub message: String,
    /// ISO-8601 send time.
    pub timestamp: String,
    pub recipients: usize,
}

/// `GET /api/health` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub mail_provider: String,
    pub uptime_seconds: u64,
}

/// `GET /api/alerts` body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertFeedResponse {
    pub alerts: Vec<AlertRecord>,
    pub critical_count: usize,
    pub advisory_active: bool,
}

/// Recipient add/remove body. Exactly one of `added` / `removed` is set.
#[derive(Debug, Clone, Serialize)]
pub struct RecipientsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removed: Option<bool>,
    pub recipients: Vec<Recipient>,
}

/// Body for lifecycle commands that report whether they took effect.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    #[serde(flatten)]
    pub outcome: CommandOutcome,
    pub session: SessionSnapshot,
}

/// Which command ran and whether it changed state.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Started(bool),
    Stopped(bool),
    Muted(bool),
    Closed(bool),
}
