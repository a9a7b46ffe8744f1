//! Organizer session management and slide upload handlers.

use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::{HeaderMap, StatusCode};

use conferencehub_core::error::AppError;
use conferencehub_core::traits::SlideUpload;
use conferencehub_entity::session::{NewSession, Session};

use crate::dto::response::{ApiResponse, MessageResponse, SessionResponse};
use crate::error::ApiError;
use crate::extractors::{OrganizerAccess, parse_session_id};
use crate::state::AppState;

/// POST /api/organizer/sessions
pub async fn create_session(
    State(state): State<AppState>,
    _organizer: OrganizerAccess,
    Json(req): Json<NewSession>,
) -> Result<(StatusCode, Json<ApiResponse<SessionResponse>>), ApiError> {
    let session = state.session_service.create_session(req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(session.into()))))
}

/// PUT /api/organizer/sessions/{id}
pub async fn update_session(
    State(state): State<AppState>,
    _organizer: OrganizerAccess,
    Path(id): Path<String>,
    Json(req): Json<Session>,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let id = parse_session_id(&id)?;
    let session = state.session_service.update_session(id, req).await?;
    Ok(Json(ApiResponse::ok(session.into())))
}

/// DELETE /api/organizer/sessions/{id}
pub async fn delete_session(
    State(state): State<AppState>,
    _organizer: OrganizerAccess,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    let id = parse_session_id(&id)?;
    state.session_service.delete_session(id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse {
        message: format!("Session {id} deleted"),
    })))
}

/// POST /api/organizer/sessions/{id}/slides (multipart, one part per file)
pub async fn upload_slides(
    State(state): State<AppState>,
    _organizer: OrganizerAccess,
    Path(id): Path<String>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<SessionResponse>>, ApiError> {
    let id = parse_session_id(&id)?;
    let traceparent = headers
        .get("traceparent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let mut files = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let Some(file_name) = field.file_name().map(String::from) else {
            continue;
        };
        let content_type = field.content_type().map(String::from);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
        files.push(SlideUpload {
            file_name,
            content_type,
            data,
        });
    }

    if files.is_empty() {
        return Err(AppError::validation("No slide files in upload").into());
    }

    let session = state
        .slide_service
        .upload_slides(id, files, traceparent)
        .await?;
    Ok(Json(ApiResponse::ok(session.into())))
}
