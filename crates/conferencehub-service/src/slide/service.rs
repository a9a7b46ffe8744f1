//! Slide uploads.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use conferencehub_core::error::AppError;
use conferencehub_core::traits::{SlideStorage, SlideUpload};
use conferencehub_core::types::id::SessionId;
use conferencehub_dispatch::FanoutDispatcher;
use conferencehub_entity::session::Session;
use conferencehub_storage::slide_object_path;
use conferencehub_store::ConferenceStore;

/// Stores uploaded slides, attaches them to their session, and queues
/// thumbnail generation.
#[derive(Debug, Clone)]
pub struct SlideService {
    /// Backing store.
    store: Arc<ConferenceStore>,
    /// Slide storage; `None` when not configured.
    storage: Option<Arc<dyn SlideStorage>>,
    /// Thumbnail job delivery.
    dispatcher: Arc<FanoutDispatcher>,
}

impl SlideService {
    /// Creates a new slide service.
    pub fn new(
        store: Arc<ConferenceStore>,
        storage: Option<Arc<dyn SlideStorage>>,
        dispatcher: Arc<FanoutDispatcher>,
    ) -> Self {
        Self {
            store,
            storage,
            dispatcher,
        }
    }

    /// Whether slide uploads can be accepted.
    pub fn is_available(&self) -> bool {
        self.storage.is_some()
    }

    /// Uploads `files` for a session and returns the updated session.
    ///
    /// Empty files are ignored. Each stored file gets one thumbnail job.
    pub async fn upload_slides(
        &self,
        session_id: SessionId,
        files: Vec<SlideUpload>,
        traceparent: Option<String>,
    ) -> Result<Session, AppError> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| AppError::configuration("Slide storage is not configured"))?;

        if self.store.get_session(session_id).await.is_none() {
            return Err(AppError::not_found(format!("Session {session_id} not found")));
        }

        let mut urls = Vec::with_capacity(files.len());
        for file in files.into_iter().filter(|f| !f.data.is_empty()) {
            let path = slide_object_path(session_id, &file.extension(), Utc::now(), Uuid::new_v4());
            let url = storage
                .put(&path, file.data.clone(), file.content_type_or_default())
                .await?;
            debug!(%session_id, file_name = %file.file_name, %url, "Slide stored");
            urls.push(url);
        }

        if urls.is_empty() {
            return Err(AppError::validation("At least one non-empty slide file is required"));
        }

        let session = self.store.append_slide_urls(session_id, &urls).await?;
        info!(%session_id, uploaded = urls.len(), "Slides uploaded");

        self.dispatcher
            .dispatch_thumbnails(session_id, urls, traceparent);
        Ok(session)
    }
}
