//! Evacuation advisory control handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use rockguard_alert::SessionSnapshot;

use crate::dto::request::{AddRecipientRequest, OpenAdvisoryRequest};
use crate::dto::response::{CommandOutcome, CommandResponse, RecipientsResponse};
use crate::error::ApiResult;
use crate::extract::JsonBody;
use crate::state::AppState;

/// GET /api/evacuation
pub async fn get_session(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.advisory.lock().await.snapshot())
}

/// POST /api/evacuation/open
pub async fn open(
    State(state): State<AppState>,
    body: Option<JsonBody<OpenAdvisoryRequest>>,
) -> ApiResult<(StatusCode, Json<SessionSnapshot>)> {
    let details = body
        .map(|JsonBody(req)| req)
        .unwrap_or_default()
        .resolve(&state.config.site);

    let mut advisory = state.advisory.lock().await;
    advisory.open(details)?;
    Ok((StatusCode::CREATED, Json(advisory.snapshot())))
}

/// POST /api/evacuation/recipients
pub async fn add_recipient(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<AddRecipientRequest>,
) -> ApiResult<Json<RecipientsResponse>> {
    let mut advisory = state.advisory.lock().await;
    let added = advisory.add_recipient(&req.email)?;
    Ok(Json(RecipientsResponse {
        added: Some(added),
        removed: None,
        recipients: advisory.recipients(),
    }))
}

/// DELETE /api/evacuation/recipients/{email}
pub async fn remove_recipient(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> ApiResult<Json<RecipientsResponse>> {
    let mut advisory = state.advisory.lock().await;
    let removed = advisory.remove_recipient(&email)?;
    Ok(Json(RecipientsResponse {
        added: None,
        removed: Some(removed),
        recipients: advisory.recipients(),
    }))
}

/// POST /api/evacuation/broadcast/start
pub async fn start_broadcast(State(state): State<AppState>) -> Json<CommandResponse> {
    let mut advisory = state.advisory.lock().await;
    let started = advisory.start_broadcast();
    Json(CommandResponse {
        outcome: CommandOutcome::Started(started),
        session: advisory.snapshot(),
    })
}

/// POST /api/evacuation/broadcast/stop
pub async fn stop_broadcast(State(state): State<AppState>) -> Json<CommandResponse> {
    let mut advisory = state.advisory.lock().await;
    let stopped = advisory.stop_broadcast();
    Json(CommandResponse {
        outcome: CommandOutcome::Stopped(stopped),
        session: advisory.snapshot(),
    })
}

/// POST /api/evacuation/mute
pub async fn mute(State(state): State<AppState>) -> Json<CommandResponse> {
    let mut advisory = state.advisory.lock().await;
    let muted = advisory.mute();
    Json(CommandResponse {
        outcome: CommandOutcome::Muted(muted),
        session: advisory.snapshot(),
    })
}

/// POST /api/evacuation/close
pub async fn close(State(state): State<AppState>) -> Json<CommandResponse> {
    let mut advisory = state.advisory.lock().await;
    let closed = advisory.close();
    Json(CommandResponse {
        outcome: CommandOutcome::Closed(closed),
        session: advisory.snapshot(),
    })
}
