use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::config::UploadsConfig;
use crate::core::error::{AppError, Result};
use crate::modules::uploads::media::classify_media;
use crate::modules::uploads::naming::derive_file_name;

/// One uploaded file part, tagged with its multipart ordinal key
/// (`image-0`, `image-1`, ..., `video-0`, ...).
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub key: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Result of a batch store: produced URLs grouped by kind plus the
/// attempted/succeeded counts callers compare when they need all-or-nothing
/// semantics (this manager does not provide that guarantee).
#[derive(Debug, Default)]
pub struct BatchUploadOutcome {
    pub image_urls: Vec<String>,
    pub video_urls: Vec<String>,
    pub attempted: usize,
    pub succeeded: usize,
}

/// Writes uploaded blobs under a per-property directory and hands back
/// stable, cache-busted public URLs.
pub struct UploadManager {
    uploads_root: PathBuf,
    public_base: String,
}

impl UploadManager {
    pub fn new(config: UploadsConfig) -> Self {
        Self {
            uploads_root: config.uploads_root,
            public_base: config.public_base,
        }
    }

    pub fn uploads_root(&self) -> &Path {
        &self.uploads_root
    }

    /// Store one file under `{uploads_root}/{property_id}/` and return its
    /// public URL with the cache-busting `?t=` suffix.
    pub async fn store(
        &self,
        property_id: &str,
        file: &UploadedFile,
        key_prefix: &str,
    ) -> Result<String> {
        if property_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Property id is required for uploads".to_string(),
            ));
        }

        let property_dir = self.uploads_root.join(property_id);
        self.ensure_writable(&property_dir).await?;

        let timestamp_millis = Utc::now().timestamp_millis();
        let derived = derive_file_name(key_prefix, &file.file_name, timestamp_millis);

        let kind = classify_media(file.content_type.as_deref(), &file.file_name, file.bytes.len());
        debug!(
            "Storing upload: property={}, name={}, kind={:?}, size={}",
            property_id,
            derived,
            kind,
            file.bytes.len()
        );

        let target = property_dir.join(&derived);
        tokio::fs::write(&target, &file.bytes).await.map_err(|e| {
            AppError::StorageUnavailable(format!(
                "Failed to write upload {}: {}",
                target.display(),
                e
            ))
        })?;

        Ok(format!(
            "{}/{}/{}?t={}",
            self.public_base, property_id, derived, timestamp_millis
        ))
    }

    /// Store a batch of keyed files sequentially.
    ///
    /// A failure on one file is logged and skipped; it never aborts the rest.
    /// Keys starting with `video` land in `video_urls`, everything else in
    /// `image_urls`, both in input order.
    pub async fn store_batch(
        &self,
        property_id: &str,
        files: &[UploadedFile],
    ) -> Result<BatchUploadOutcome> {
        let mut outcome = BatchUploadOutcome {
            attempted: files.len(),
            ..Default::default()
        };

        if files.is_empty() {
            return Ok(outcome);
        }

        if property_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Property id is required for uploads".to_string(),
            ));
        }

        for file in files {
            let is_video = file.key.starts_with("video");
            let key_prefix = if is_video { "video" } else { "image" };

            match self.store(property_id, file, key_prefix).await {
                Ok(url) => {
                    outcome.succeeded += 1;
                    if is_video {
                        outcome.video_urls.push(url);
                    } else {
                        outcome.image_urls.push(url);
                    }
                }
                Err(e) => {
                    warn!(
                        "Upload failed, skipping: property={}, key={}, name={}, size={}, target={}: {}",
                        property_id,
                        file.key,
                        file.file_name,
                        file.bytes.len(),
                        self.uploads_root.join(property_id).display(),
                        e
                    );
                }
            }
        }

        if outcome.succeeded < outcome.attempted {
            info!(
                "Batch upload finished with failures: property={}, attempted={}, succeeded={}",
                property_id, outcome.attempted, outcome.succeeded
            );
        }

        Ok(outcome)
    }

    /// Recursively delete the property's media directory.
    /// A directory that does not exist counts as success.
    pub async fn remove_all(&self, property_id: &str) -> Result<()> {
        if property_id.trim().is_empty() {
            return Err(AppError::Validation(
                "Property id is required for media removal".to_string(),
            ));
        }

        let property_dir = self.uploads_root.join(property_id);
        match tokio::fs::remove_dir_all(&property_dir).await {
            Ok(()) => {
                info!("Removed media directory {}", property_dir.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(format!(
                "Failed to remove media directory {}: {}",
                property_dir.display(),
                e
            ))),
        }
    }

    /// Create the uploads root and property directory, then probe write
    /// capability with a throwaway file so disk-full and permission faults
    /// surface before the real write.
    async fn ensure_writable(&self, property_dir: &Path) -> Result<()> {
        tokio::fs::create_dir_all(&self.uploads_root)
            .await
            .map_err(|e| {
                AppError::StorageUnavailable(format!(
                    "Failed to create uploads root {}: {}",
                    self.uploads_root.display(),
                    e
                ))
            })?;

        tokio::fs::create_dir_all(property_dir).await.map_err(|e| {
            AppError::StorageUnavailable(format!(
                "Failed to create property directory {}: {}",
                property_dir.display(),
                e
            ))
        })?;

        let probe = property_dir.join(format!(".write-probe-{}", Uuid::new_v4().simple()));
        tokio::fs::write(&probe, b"probe").await.map_err(|e| {
            AppError::StorageUnavailable(format!(
                "Write probe failed in {}: {}",
                property_dir.display(),
                e
            ))
        })?;
        tokio::fs::remove_file(&probe).await.map_err(|e| {
            AppError::StorageUnavailable(format!(
                "Write probe cleanup failed in {}: {}",
                property_dir.display(),
                e
            ))
        })?;

        Ok(())
    }
}
