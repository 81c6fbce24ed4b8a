//! # rockguard-api
//!
//! HTTP API layer for RockGuard built on Axum.
//!
//! Serves the one-shot evacuation alert endpoint and the control surface
//! operators use to drive an evacuation advisory: alert feed, recipients,
//! broadcast start/stop, siren mute, and close.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use router::build_router;
pub use state::AppState;
