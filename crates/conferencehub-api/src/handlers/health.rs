//! Health check handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let snapshot = state.store.snapshot().await;

    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        sessions: snapshot.sessions.len(),
        registrations: snapshot.registrations.len(),
        slide_storage: state.slide_service.is_available(),
        channels: state.dispatcher.channel_status(),
        deliveries_in_flight: state.dispatcher.in_flight(),
        telemetry: state.dispatcher.telemetry().counters(),
    }))
}
