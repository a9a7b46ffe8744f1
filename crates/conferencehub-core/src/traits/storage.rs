//! Slide storage trait for uploaded session material.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// One file submitted for upload.
#[derive(Debug, Clone)]
pub struct SlideUpload {
    /// Original client-side file name (used for the extension only).
    pub file_name: String,
    /// Declared MIME type, if any.
    pub content_type: Option<String>,
    /// File contents.
    pub data: Bytes,
}

impl SlideUpload {
    /// Lower-cased extension including the dot, or empty.
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }

    /// Declared content type, falling back to `application/octet-stream`.
    pub fn content_type_or_default(&self) -> &str {
        match self.content_type.as_deref() {
            Some(ct) if !ct.trim().is_empty() => ct,
            _ => "application/octet-stream",
        }
    }
}

/// Backend that persists slides and returns a public reference for each.
#[async_trait]
pub trait SlideStorage: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local").
    fn provider_type(&self) -> &str;

    /// Store `data` at `path` and return the public URL of the object.
    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<String>;
}
