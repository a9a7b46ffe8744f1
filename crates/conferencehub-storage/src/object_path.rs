//! Object naming for uploaded slides.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use conferencehub_core::types::id::SessionId;

/// Build `sessions/{id}/{yyyyMMddHHmmssfff}-{uuid}{ext}`.
///
/// `extension` includes its leading dot, or is empty.
pub fn slide_object_path(
    session_id: SessionId,
    extension: &str,
    at: DateTime<Utc>,
    unique: Uuid,
) -> String {
    format!(
        "sessions/{}/{}-{}{}",
        session_id,
        at.format("%Y%m%d%H%M%S%3f"),
        unique.simple(),
        extension
    )
}
