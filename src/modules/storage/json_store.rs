use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::config::StoreConfig;
use crate::core::error::{AppError, Result};
use crate::features::properties::models::Property;

/// Pluggable persistence seam for the property collection.
///
/// Implementations load and replace the collection wholesale. There is no
/// locking or versioning: two writers racing on `save_all` lose one write at
/// whole-collection granularity. That semantics is deliberate and documented,
/// not something an implementation should paper over silently.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Property>>;
    async fn save_all(&self, records: &[Property]) -> Result<()>;
}

/// Flat-file store keeping the full collection as one JSON array.
pub struct JsonFileStore {
    data_file: PathBuf,
}

impl JsonFileStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            data_file: config.data_file,
        }
    }

    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Create the parent directory and an empty collection file if either is
    /// missing. Missing state is auto-provisioned, never an error.
    async fn ensure_backing_file(&self) -> Result<()> {
        if let Some(parent) = self.data_file.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::StorageUnavailable(format!(
                        "Failed to create data directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        if tokio::fs::metadata(&self.data_file).await.is_err() {
            tokio::fs::write(&self.data_file, b"[]").await.map_err(|e| {
                AppError::StorageUnavailable(format!(
                    "Failed to initialize data file {}: {}",
                    self.data_file.display(),
                    e
                ))
            })?;
            info!("Initialized empty property store at {}", self.data_file.display());
        }

        Ok(())
    }
}

#[async_trait]
impl PropertyStore for JsonFileStore {
    async fn load_all(&self) -> Result<Vec<Property>> {
        self.ensure_backing_file().await?;

        let raw = tokio::fs::read(&self.data_file).await?;
        if raw.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(Vec::new());
        }

        let records: Vec<Property> = serde_json::from_slice(&raw).map_err(|e| {
            AppError::Internal(format!(
                "Corrupt property store {}: {}",
                self.data_file.display(),
                e
            ))
        })?;

        debug!("Loaded {} properties from {}", records.len(), self.data_file.display());
        Ok(records)
    }

    async fn save_all(&self, records: &[Property]) -> Result<()> {
        self.ensure_backing_file().await?;

        let serialized = serde_json::to_vec_pretty(records)?;

        // Write to a sibling temp path and rename so a crash mid-write never
        // leaves a half-written collection behind.
        let temp_path = self
            .data_file
            .with_extension(format!("json.tmp-{}", Uuid::new_v4().simple()));

        tokio::fs::write(&temp_path, &serialized).await.map_err(|e| {
            AppError::StorageUnavailable(format!(
                "Failed to write {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        if let Err(e) = tokio::fs::rename(&temp_path, &self.data_file).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(AppError::StorageUnavailable(format!(
                "Failed to replace {}: {}",
                self.data_file.display(),
                e
            )));
        }

        debug!("Persisted {} properties to {}", records.len(), self.data_file.display());
        Ok(())
    }
}
