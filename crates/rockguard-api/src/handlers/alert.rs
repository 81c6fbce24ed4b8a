//! One-shot evacuation alert handler.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use rockguard_alert::DispatchResult;
use rockguard_core::error::AppError;

use crate::dto::request::SendAlertRequest;
use crate::dto::response::SendAlertResponse;
use crate::error::ApiResult;
use crate::state::AppState;

const NO_EMAILS: &str = "No email addresses provided";
const SEND_FAILED: &str = "Failed to send evacuation alert";

/// POST /api/send-evacuation-alert
///
/// Sends one alert to every address in the body. A missing or empty
/// `emails` array is a 400; every other problem is reported as a 500
/// with a generic message, the cause going to the log only.
pub async fn send_evacuation_alert(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SendAlertResponse>> {
    let value: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Malformed evacuation alert request");
        AppError::internal(SEND_FAILED)
    })?;

    let has_emails = value
        .get("emails")
        .and_then(Value::as_array)
        .is_some_and(|emails| !emails.is_empty());
    if !has_emails {
        return Err(AppError::validation(NO_EMAILS).into());
    }

    let request: SendAlertRequest = serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "Invalid evacuation alert request");
        AppError::internal(SEND_FAILED)
    })?;

    let (recipients, details) = request.into_parts();
    let payload = details.issue();

    match state.dispatcher.send(&recipients, &payload).await {
        DispatchResult::Delivered { .. } => Ok(Json(SendAlertResponse {
            success: true,
            message: format!("Alert sent to {} recipient(s)", recipients.len()),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            recipients: recipients.len(),
        })),
        DispatchResult::Failed { reason } => {
            tracing::error!(%reason, "Evacuation alert send failed");
            Err(AppError::internal(SEND_FAILED).into())
        }
    }
}
