//! Local filesystem slide storage.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use conferencehub_core::config::SlideStorageConfig;
use conferencehub_core::error::{AppError, ErrorKind};
use conferencehub_core::result::AppResult;
use conferencehub_core::traits::SlideStorage;

/// Writes slides under `{root}/{container}/` and returns
/// `{public_base_url}/{container}/{path}` for each.
#[derive(Debug, Clone)]
pub struct LocalSlideStorage {
    /// Directory objects are written into (root joined with the container).
    container_dir: PathBuf,
    /// URL prefix for returned references, without a trailing slash.
    public_prefix: String,
}

impl LocalSlideStorage {
    /// Create the provider, making sure the container directory exists.
    ///
    /// Fails with a configuration error when no root path is set.
    pub async fn new(config: &SlideStorageConfig) -> AppResult<Self> {
        if !config.is_configured() {
            return Err(AppError::configuration(
                "Slide storage is not configured (storage.root_path is empty)",
            ));
        }

        let container = config.container_name.trim().trim_matches('/');
        let container_dir = Path::new(config.root_path.trim()).join(container);
        fs::create_dir_all(&container_dir).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!(
                    "Failed to create slide container: {}",
                    container_dir.display()
                ),
                e,
            )
        })?;

        let base = config.public_base_url.trim().trim_end_matches('/');
        let public_prefix = if container.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{container}")
        };

        Ok(Self {
            container_dir,
            public_prefix,
        })
    }

    /// Resolve an object path inside the container, rejecting escapes.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            return Err(AppError::validation(format!("Invalid object path: {path}")));
        }
        Ok(self.container_dir.join(relative))
    }
}

#[async_trait]
impl SlideStorage for LocalSlideStorage {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn put(&self, path: &str, data: Bytes, content_type: &str) -> AppResult<String> {
        let full_path = self.resolve(path)?;
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write slide: {path}"),
                e,
            )
        })?;

        debug!(path, bytes = data.len(), content_type, "Stored slide");
        Ok(format!(
            "{}/{}",
            self.public_prefix,
            path.trim_start_matches('/')
        ))
    }
}
