//! Public session catalogue handlers.

use axum::Json;
use axum::extract::{Path, State};

use crate::dto::response::{ApiResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::parse_session_id;
use crate::state::AppState;

/// GET /api/sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<SessionResponse>>> {
    let sessions = state.session_service.list_sessions().await;
    Json(ApiResponse::ok(
        sessions.into_iter().map(SessionResponse::from).collect(),
    ))
}

/// GET /api/sessions/{id}
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let id = parse_session_id(&id)?;
    let session = state.session_service.get_session(id).await?;
    Ok(Json(ApiResponse::ok(session.into())))
}
