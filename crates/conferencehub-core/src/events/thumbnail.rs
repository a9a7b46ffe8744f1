//! Thumbnail generation job for an uploaded slide.

use serde::{Deserialize, Serialize};

use crate::types::id::SessionId;

/// One queued job per uploaded slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThumbnailJob {
    /// Session the slide belongs to.
    pub session_id: SessionId,
    /// Public URL of the stored slide.
    pub slide_url: String,
    /// Correlation id propagated from the upload request, if any.
    pub traceparent: Option<String>,
}
