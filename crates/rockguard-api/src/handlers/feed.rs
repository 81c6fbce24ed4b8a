//! Alert feed handlers.

use axum::Json;
use axum::extract::{Path, State};

use rockguard_alert::feed::AlertRecord;

use crate::dto::response::AlertFeedResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/alerts
pub async fn list_alerts(State(state): State<AppState>) -> Json<AlertFeedResponse> {
    let feed = state.feed.read().unwrap_or_else(|e| e.into_inner());
    Json(AlertFeedResponse {
        alerts: feed.list().to_vec(),
        critical_count: feed.critical_count(),
        advisory_active: feed.advisory_active(),
    })
}

/// POST /api/alerts/{id}/acknowledge
pub async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<AlertRecord>> {
    let mut feed = state.feed.write().unwrap_or_else(|e| e.into_inner());
    let alert = feed.acknowledge(&id)?.clone();
    Ok(Json(alert))
}
