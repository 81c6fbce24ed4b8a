//! Route definitions for the RockGuard HTTP API.
//!
//! All routes are mounted under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(alert_routes())
        .merge(feed_routes())
        .merge(evacuation_routes())
        .merge(health_routes());

    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// One-shot evacuation email
fn alert_routes() -> Router<AppState> {
    Router::new().route(
        "/send-evacuation-alert",
        post(handlers::alert::send_evacuation_alert),
    )
}

/// Prediction alert history
fn feed_routes() -> Router<AppState> {
    Router::new()
        .route("/alerts", get(handlers::feed::list_alerts))
        .route(
            "/alerts/{id}/acknowledge",
            post(handlers::feed::acknowledge_alert),
        )
}

/// Advisory lifecycle
fn evacuation_routes() -> Router<AppState> {
    Router::new()
        .route("/evacuation", get(handlers::evacuation::get_session))
        .route("/evacuation/open", post(handlers::evacuation::open))
        .route(
            "/evacuation/recipients",
            post(handlers::evacuation::add_recipient),
        )
        .route(
            "/evacuation/recipients/{email}",
            delete(handlers::evacuation::remove_recipient),
        )
        .route(
            "/evacuation/broadcast/start",
            post(handlers::evacuation::start_broadcast),
        )
        .route(
            "/evacuation/broadcast/stop",
            post(handlers::evacuation::stop_broadcast),
        )
        .route("/evacuation/mute", post(handlers::evacuation::mute))
        .route("/evacuation/close", post(handlers::evacuation::close))
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
