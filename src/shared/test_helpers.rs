#[cfg(test)]
use chrono::Utc;

#[cfg(test)]
use fake::{faker::lorem::en::Sentence, Fake};

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::core::config::{StoreConfig, UploadsConfig};

#[cfg(test)]
use crate::features::properties::models::{Property, PropertyCategory, PropertySpecs};

#[cfg(test)]
use crate::features::properties::services::PropertyService;

#[cfg(test)]
use crate::modules::storage::JsonFileStore;

#[cfg(test)]
use crate::modules::uploads::UploadManager;

#[cfg(test)]
pub fn sample_property(title: &str, price: &str, location: &str) -> Property {
    let now = Utc::now();
    Property {
        id: uuid::Uuid::new_v4().to_string(),
        title: title.to_string(),
        price: price.to_string(),
        location: location.to_string(),
        description: Sentence(3..8).fake(),
        category: PropertyCategory::Buy,
        property_type: "villa".to_string(),
        specs: PropertySpecs::default(),
        features: vec![],
        amenities: vec![],
        images: vec![],
        video_url: None,
        video_urls: vec![],
        featured: false,
        featured_order: None,
        bedrooms: None,
        created_at: now,
        updated_at: now,
        extra: serde_json::Map::new(),
    }
}

/// Property service wired to a store and uploads root inside `dir`
#[cfg(test)]
pub fn service_fixture(dir: &tempfile::TempDir) -> PropertyService {
    let store = Arc::new(JsonFileStore::new(StoreConfig {
        data_file: dir.path().join("data").join("properties.json"),
    }));
    let uploads = Arc::new(UploadManager::new(UploadsConfig {
        uploads_root: dir.path().join("uploads"),
        public_base: "/uploads".to_string(),
    }));
    PropertyService::new(store, uploads)
}
