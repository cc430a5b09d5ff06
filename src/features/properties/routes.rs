use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::sync::Arc;

use crate::features::properties::handlers::{
    create_property, delete_property, get_property, list_properties, update_property,
};
use crate::features::properties::services::PropertyService;

/// Create routes for the properties feature
///
/// `max_body_size` bounds the multipart create/update requests, which carry
/// file payloads well past axum's 2MB default.
pub fn routes(service: Arc<PropertyService>, max_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/properties",
            get(list_properties)
                .post(create_property)
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .route(
            "/api/properties/{id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property)
                .layer(DefaultBodyLimit::max(max_body_size)),
        )
        .with_state(service)
}
