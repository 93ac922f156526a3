//! Routes for test harnesses: reset the store, inspect events and counters.
//!
//! Mounted under `/test` only when `ENABLE_TEST_ROUTES` is on.

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use domain_users::UserResult;
use observability::{Event, MetricsSnapshot};
use serde::Serialize;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/reset", post(reset))
        .route("/events", get(events))
        .route("/metrics", get(metrics))
        .with_state(state)
}

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub message: &'static str,
}

/// POST /test/reset
///
/// Clears the user table. Recorded events and counters are left alone.
async fn reset(State(state): State<AppState>) -> UserResult<Json<ResetResponse>> {
    state.users.reset().await?;
    tracing::warn!("User table reset through test route");

    Ok(Json(ResetResponse {
        message: "Database reset successfully",
    }))
}

/// GET /test/events
async fn events(State(state): State<AppState>) -> Json<Vec<Event>> {
    Json(state.recorder.events.events())
}

/// GET /test/metrics
async fn metrics(State(state): State<AppState>) -> Json<MetricsSnapshot> {
    Json(state.recorder.metrics.snapshot())
}
