//! Registration handlers.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use conferencehub_entity::registration::Registration;

use crate::dto::request::RegisterRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::{OrganizerAccess, parse_session_id};
use crate::state::AppState;

/// POST /api/sessions/{id}/registrations
pub async fn register(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Registration>>), ApiError> {
    let session_id = parse_session_id(&id)?;
    let registration = state
        .registration_service
        .register(req.into_new_registration(session_id))
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(registration))))
}

/// GET /api/organizer/registrations?session_id=N
///
/// Without `session_id`, lists every registration.
pub async fn list_registrations(
    State(state): State<AppState>,
    _organizer: OrganizerAccess,
    Query(filter): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<Vec<Registration>>>, ApiError> {
    let registrations = match filter.get("session_id") {
        Some(raw) => {
            let session_id = parse_session_id(raw)?;
            state
                .registration_service
                .list_for_session(session_id)
                .await?
        }
        None => state.registration_service.list_registrations().await,
    };
    Ok(Json(ApiResponse::ok(registrations)))
}
