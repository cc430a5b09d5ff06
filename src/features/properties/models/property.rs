use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Listing category: properties are offered for purchase or for lease
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PropertyCategory {
    Buy,
    Lease,
}

/// Nested specification block.
///
/// All fields are free-form strings and default to empty: after creation a
/// record always carries the full shape so display code never probes for
/// missing keys. Empty means "not applicable" (plot listings have no
/// bedrooms, flats have no nali size).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertySpecs {
    pub bedrooms: String,
    pub bathrooms: String,
    pub area: String,
    pub land_size: String,
    pub nali_size: String,
    pub plot_size: String,
    pub plot_dimensions: String,
    pub plot_type: String,
}

/// Canonical property record as persisted in the JSON collection.
///
/// Field names serialize camelCase to match the stored data layout.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Opaque unique identifier, assigned at creation, immutable
    pub id: String,
    pub title: String,
    /// Free-form currency string, e.g. "₹ 1,25,00,000" or "1.2 Cr"
    pub price: String,
    /// Free-form, often a comma-separated region hierarchy
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub category: PropertyCategory,
    /// Free-form (villa, plot, flat, ...), compared case-insensitively
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub specs: PropertySpecs,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Ordered; first entry is the cover image
    #[serde(default)]
    pub images: Vec<String>,
    /// Legacy single-video field, always mirroring `video_urls[0]`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    /// Source of truth for attached videos
    #[serde(default)]
    pub video_urls: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    /// Homepage display position, meaningful only when `featured`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_order: Option<i64>,
    /// Legacy top-level bedroom count on older records; `specs.bedrooms`
    /// takes precedence
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Attributes the model does not know about ride along untouched
    #[serde(flatten)]
    #[schema(value_type = Object)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Property {
    /// Re-derive the legacy `video_url` mirror from `video_urls`.
    /// Must be called after any mutation of the video list.
    pub fn sync_video_mirror(&mut self) {
        self.video_url = self
            .video_urls
            .first()
            .filter(|u| !u.is_empty())
            .cloned();
    }

    /// Bedroom count used by the bhk filter: `specs.bedrooms`, falling back
    /// to the legacy top-level field on older records.
    pub fn bhk_value(&self) -> &str {
        if !self.specs.bedrooms.trim().is_empty() {
            &self.specs.bedrooms
        } else {
            self.bedrooms.as_deref().unwrap_or("")
        }
    }
}
