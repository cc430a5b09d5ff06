use utoipa::{Modify, OpenApi};

use crate::features::properties::{dtos as properties_dtos, handlers as properties_handlers};
use crate::features::properties::models as properties_models;
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Properties
        properties_handlers::list_properties,
        properties_handlers::get_property,
        properties_handlers::create_property,
        properties_handlers::update_property,
        properties_handlers::delete_property,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Properties
            properties_models::PropertyCategory,
            properties_models::PropertySpecs,
            properties_dtos::PropertySpecsDto,
            properties_dtos::CreatePropertyDto,
            properties_dtos::UpdatePropertyDto,
            properties_dtos::SortOption,
            properties_dtos::PropertyResponseDto,
            properties_dtos::UploadSummaryDto,
            properties_dtos::PropertyWriteResponseDto,
            properties_dtos::DeletePropertyResponseDto,
            ApiResponse<Vec<properties_dtos::PropertyResponseDto>>,
            ApiResponse<properties_dtos::PropertyResponseDto>,
            ApiResponse<properties_dtos::PropertyWriteResponseDto>,
            ApiResponse<properties_dtos::DeletePropertyResponseDto>,
        )
    ),
    tags(
        (name = "properties", description = "Property listings, media uploads and filtered search"),
    ),
    info(
        title = "Himgiri API",
        version = "0.1.0",
        description = "API documentation for Himgiri Estates",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
