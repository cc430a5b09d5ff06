use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::features::properties::models::{Property, PropertyCategory, PropertySpecs};
use crate::modules::uploads::BatchUploadOutcome;

/// Specification block as accepted on create/update.
///
/// Every field optional; `normalize` fills the stable all-fields shape the
/// stored record carries.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertySpecsDto {
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    pub area: Option<String>,
    pub land_size: Option<String>,
    pub nali_size: Option<String>,
    pub plot_size: Option<String>,
    pub plot_dimensions: Option<String>,
    pub plot_type: Option<String>,
}

impl PropertySpecsDto {
    pub fn normalize(self) -> PropertySpecs {
        PropertySpecs {
            bedrooms: self.bedrooms.unwrap_or_default(),
            bathrooms: self.bathrooms.unwrap_or_default(),
            area: self.area.unwrap_or_default(),
            land_size: self.land_size.unwrap_or_default(),
            nali_size: self.nali_size.unwrap_or_default(),
            plot_size: self.plot_size.unwrap_or_default(),
            plot_dimensions: self.plot_dimensions.unwrap_or_default(),
            plot_type: self.plot_type.unwrap_or_default(),
        }
    }
}

/// JSON payload of the multipart `data` field on POST /api/properties
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "price is required"))]
    pub price: String,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    #[serde(default)]
    pub description: String,
    pub category: PropertyCategory,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub specs: PropertySpecsDto,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Pre-existing image URLs (uploaded files are appended after these)
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub video_urls: Vec<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub featured_order: Option<i64>,
}

/// JSON payload of the multipart `data` field on PUT /api/properties/{id}.
///
/// Partial-merge semantics: present fields overwrite, omitted fields keep
/// their stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdatePropertyDto {
    pub title: Option<String>,
    pub price: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub category: Option<PropertyCategory>,
    pub property_type: Option<String>,
    pub specs: Option<PropertySpecsDto>,
    pub features: Option<Vec<String>>,
    pub amenities: Option<Vec<String>>,
    /// Replaces the whole image list (reordering); uploaded files are
    /// appended afterwards
    pub images: Option<Vec<String>>,
    pub video_url: Option<String>,
    pub video_urls: Option<Vec<String>>,
    pub featured: Option<bool>,
    pub featured_order: Option<i64>,
}

/// Sort applied by the list endpoint after filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    /// Featured records only, ascending `featuredOrder`
    Featured,
    /// Most recently created first
    Newest,
}

/// Query parameters of GET /api/properties
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PropertyListQuery {
    /// Exact category match (buy | lease)
    pub category: Option<PropertyCategory>,
    /// Matched against comma-segments of the record location; known region
    /// names match their configured sub-regions
    pub location: Option<String>,
    /// Exact case-insensitive property type match
    pub property_type: Option<String>,
    /// Bedroom count compared as trimmed string equality
    pub bhk_option: Option<String>,
    /// Inclusive lower price bound (same tolerant format as record prices)
    pub price_min: Option<String>,
    /// Inclusive upper price bound
    pub price_max: Option<String>,
    /// Optional post-filter sort (featured | newest)
    pub sort: Option<SortOption>,
}

/// Response DTO for a property record
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyResponseDto {
    pub id: String,
    pub title: String,
    pub price: String,
    pub location: String,
    pub description: String,
    pub category: PropertyCategory,
    pub property_type: String,
    pub specs: PropertySpecs,
    pub features: Vec<String>,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub video_urls: Vec<String>,
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_order: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Property> for PropertyResponseDto {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            title: p.title,
            price: p.price,
            location: p.location,
            description: p.description,
            category: p.category,
            property_type: p.property_type,
            specs: p.specs,
            features: p.features,
            amenities: p.amenities,
            images: p.images,
            video_url: p.video_url,
            video_urls: p.video_urls,
            featured: p.featured,
            featured_order: p.featured_order,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Upload counts and produced URLs for a create/update carrying file parts.
///
/// A batch with failures still reports overall success with a reduced result
/// set; callers needing all-or-nothing compare `succeeded` to `attempted`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadSummaryDto {
    pub attempted: i64,
    pub succeeded: i64,
    pub image_urls: Vec<String>,
    pub video_urls: Vec<String>,
}

impl From<BatchUploadOutcome> for UploadSummaryDto {
    fn from(o: BatchUploadOutcome) -> Self {
        Self {
            attempted: o.attempted as i64,
            succeeded: o.succeeded as i64,
            image_urls: o.image_urls,
            video_urls: o.video_urls,
        }
    }
}

/// Response DTO for create/update operations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PropertyWriteResponseDto {
    pub property: PropertyResponseDto,
    pub uploads: UploadSummaryDto,
}

/// Response DTO for delete operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeletePropertyResponseDto {
    /// Confirmation that the record and its media directory are gone
    pub deleted: bool,
}
