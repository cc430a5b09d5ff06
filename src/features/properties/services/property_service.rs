use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::error::Result;
use crate::features::properties::dtos::{CreatePropertyDto, UpdatePropertyDto};
use crate::features::properties::models::Property;
use crate::features::properties::services::filter_service::{self, FilterCriteria};
use crate::modules::storage::PropertyStore;
use crate::modules::uploads::{BatchUploadOutcome, UploadManager, UploadedFile};

/// Repository over the property collection.
///
/// Every operation is a full read-modify-write cycle against the store with
/// no locking: concurrent writers race last-write-wins at collection
/// granularity (see `PropertyStore`).
pub struct PropertyService {
    store: Arc<dyn PropertyStore>,
    uploads: Arc<UploadManager>,
}

impl PropertyService {
    pub fn new(store: Arc<dyn PropertyStore>, uploads: Arc<UploadManager>) -> Self {
        Self { store, uploads }
    }

    /// Create a record, store any attached files, append it to the
    /// collection and persist.
    pub async fn create(
        &self,
        dto: CreatePropertyDto,
        files: Vec<UploadedFile>,
    ) -> Result<(Property, BatchUploadOutcome)> {
        let now = Utc::now();
        let mut record = Property {
            id: Uuid::new_v4().to_string(),
            title: dto.title,
            price: dto.price,
            location: dto.location,
            description: dto.description,
            category: dto.category,
            property_type: dto.property_type,
            specs: dto.specs.normalize(),
            features: dto.features,
            amenities: dto.amenities,
            images: dto.images,
            video_url: None,
            video_urls: dto.video_urls,
            featured: dto.featured,
            featured_order: dto.featured_order,
            bedrooms: None,
            created_at: now,
            updated_at: now,
            extra: serde_json::Map::new(),
        };

        // Legacy single-video payloads promote into the list
        if record.video_urls.is_empty() {
            if let Some(url) = dto.video_url.filter(|u| !u.is_empty()) {
                record.video_urls.push(url);
            }
        }

        let outcome = self.uploads.store_batch(&record.id, &files).await?;
        record.images.extend(outcome.image_urls.iter().cloned());
        record.video_urls.extend(outcome.video_urls.iter().cloned());
        record.sync_video_mirror();

        let mut records = self.store.load_all().await?;
        records.push(record.clone());
        self.store.save_all(&records).await?;

        info!(
            "Property created: id={}, title={:?}, uploads={}/{}",
            record.id, record.title, outcome.succeeded, outcome.attempted
        );

        Ok((record, outcome))
    }

    /// Shallow-merge a partial update onto the record with the given id.
    ///
    /// Returns `None` when the id is unknown; that is a legitimate negative
    /// result, not an error. Attached files are stored and their URLs
    /// appended after the merge.
    pub async fn update(
        &self,
        id: &str,
        dto: UpdatePropertyDto,
        files: Vec<UploadedFile>,
    ) -> Result<Option<(Property, BatchUploadOutcome)>> {
        let mut records = self.store.load_all().await?;

        let Some(position) = records.iter().position(|r| r.id == id) else {
            debug!("Update target not found: id={}", id);
            return Ok(None);
        };

        let record = &mut records[position];
        merge_partial(record, dto);

        let outcome = self.uploads.store_batch(id, &files).await?;
        record.images.extend(outcome.image_urls.iter().cloned());
        record.video_urls.extend(outcome.video_urls.iter().cloned());
        record.sync_video_mirror();
        record.updated_at = Utc::now();

        let updated = record.clone();
        self.store.save_all(&records).await?;

        info!(
            "Property updated: id={}, uploads={}/{}",
            id, outcome.succeeded, outcome.attempted
        );

        Ok(Some((updated, outcome)))
    }

    /// Remove the record and cascade-delete its media directory.
    /// Unknown id returns `false` without side effects.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.store.load_all().await?;

        let Some(position) = records.iter().position(|r| r.id == id) else {
            debug!("Delete target not found: id={}", id);
            return Ok(false);
        };

        records.remove(position);
        self.store.save_all(&records).await?;
        self.uploads.remove_all(id).await?;

        info!("Property deleted: id={}", id);
        Ok(true)
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Option<Property>> {
        let records = self.store.load_all().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    pub async fn get_all(&self) -> Result<Vec<Property>> {
        self.store.load_all().await
    }

    /// Feed the full collection through the filter engine.
    pub async fn search(&self, criteria: &FilterCriteria) -> Result<Vec<Property>> {
        let records = self.store.load_all().await?;
        Ok(filter_service::apply(&records, criteria))
    }
}

/// Present DTO fields overwrite; omitted fields keep their stored value.
fn merge_partial(record: &mut Property, dto: UpdatePropertyDto) {
    if let Some(title) = dto.title {
        record.title = title;
    }
    if let Some(price) = dto.price {
        record.price = price;
    }
    if let Some(location) = dto.location {
        record.location = location;
    }
    if let Some(description) = dto.description {
        record.description = description;
    }
    if let Some(category) = dto.category {
        record.category = category;
    }
    if let Some(property_type) = dto.property_type {
        record.property_type = property_type;
    }
    if let Some(specs) = dto.specs {
        record.specs = specs.normalize();
    }
    if let Some(features) = dto.features {
        record.features = features;
    }
    if let Some(amenities) = dto.amenities {
        record.amenities = amenities;
    }
    if let Some(images) = dto.images {
        record.images = images;
    }
    if let Some(featured) = dto.featured {
        record.featured = featured;
    }
    if let Some(featured_order) = dto.featured_order {
        record.featured_order = Some(featured_order);
    }

    // video_urls is the source of truth; an explicit list wins over the
    // legacy single field, which only replaces the head slot.
    if let Some(video_urls) = dto.video_urls {
        record.video_urls = video_urls;
    } else if let Some(video_url) = dto.video_url {
        if video_url.is_empty() {
            if !record.video_urls.is_empty() {
                record.video_urls.remove(0);
            }
        } else if record.video_urls.is_empty() {
            record.video_urls.push(video_url);
        } else {
            record.video_urls[0] = video_url;
        }
    }
    record.sync_video_mirror();
}
