use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::properties::dtos::{
    CreatePropertyDto, DeletePropertyResponseDto, PropertyListQuery, PropertyResponseDto,
    PropertyWriteResponseDto, SortOption, UpdatePropertyDto,
};
use crate::features::properties::models::Property;
use crate::features::properties::services::{FilterCriteria, PropertyService};
use crate::modules::uploads::UploadedFile;
use crate::shared::constants::{MAX_UPLOAD_FILE_SIZE, RECORD_FIELD_NAME};
use crate::shared::types::{ApiResponse, Meta};

/// List properties matching the given criteria
///
/// All criteria are optional and AND together. `sort=featured` narrows to
/// featured records in homepage order; `sort=newest` orders by creation time
/// descending. Without `sort` the stored order is preserved.
#[utoipa::path(
    get,
    path = "/api/properties",
    tag = "properties",
    params(PropertyListQuery),
    responses(
        (status = 200, description = "Filtered property list", body = ApiResponse<Vec<PropertyResponseDto>>),
        (status = 400, description = "Invalid query parameter")
    )
)]
pub async fn list_properties(
    State(service): State<Arc<PropertyService>>,
    Query(query): Query<PropertyListQuery>,
) -> Result<Json<ApiResponse<Vec<PropertyResponseDto>>>> {
    let criteria = FilterCriteria {
        category: query.category,
        location: query.location,
        property_type: query.property_type,
        bhk_option: query.bhk_option,
        price_min: query.price_min,
        price_max: query.price_max,
    };

    let mut properties = service.search(&criteria).await?;
    if let Some(sort) = query.sort {
        properties = sort_properties(properties, sort);
    }

    let total = properties.len() as i64;
    let data: Vec<PropertyResponseDto> = properties.into_iter().map(Into::into).collect();

    Ok(Json(ApiResponse::success(
        Some(data),
        None,
        Some(Meta { total }),
    )))
}

/// Get a single property by id
#[utoipa::path(
    get,
    path = "/api/properties/{id}",
    tag = "properties",
    params(("id" = String, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property found", body = ApiResponse<PropertyResponseDto>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn get_property(
    State(service): State<Arc<PropertyService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PropertyResponseDto>>> {
    let property = service
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Property '{}' not found", id)))?;

    Ok(Json(ApiResponse::success(Some(property.into()), None, None)))
}

/// Create a property
///
/// Accepts multipart/form-data with:
/// - `data`: JSON record payload (required)
/// - `image-0`, `image-1`, ...: image files to attach
/// - `video-0`, `video-1`, ...: video files to attach
#[utoipa::path(
    post,
    path = "/api/properties",
    tag = "properties",
    request_body(
        content = CreatePropertyDto,
        content_type = "multipart/form-data",
        description = "Record payload in the `data` field plus keyed file parts",
    ),
    responses(
        (status = 201, description = "Property created", body = ApiResponse<PropertyWriteResponseDto>),
        (status = 400, description = "Missing or invalid payload"),
        (status = 503, description = "Upload storage unavailable")
    )
)]
pub async fn create_property(
    State(service): State<Arc<PropertyService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PropertyWriteResponseDto>>)> {
    let (payload, files) = read_multipart::<CreatePropertyDto>(&mut multipart).await?;

    let dto = payload.ok_or_else(|| {
        AppError::BadRequest(format!("Field '{}' is required", RECORD_FIELD_NAME))
    })?;
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (property, outcome) = service.create(dto, files).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(PropertyWriteResponseDto {
                property: property.into(),
                uploads: outcome.into(),
            }),
            None,
            None,
        )),
    ))
}

/// Update a property
///
/// Accepts multipart/form-data with an optional `data` field holding a
/// partial JSON payload (present fields overwrite, omitted fields are kept)
/// plus keyed file parts whose URLs are appended to the record.
#[utoipa::path(
    put,
    path = "/api/properties/{id}",
    tag = "properties",
    params(("id" = String, Path, description = "Property id")),
    request_body(
        content = UpdatePropertyDto,
        content_type = "multipart/form-data",
        description = "Partial record payload in the `data` field plus keyed file parts",
    ),
    responses(
        (status = 200, description = "Property updated", body = ApiResponse<PropertyWriteResponseDto>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Property not found"),
        (status = 503, description = "Upload storage unavailable")
    )
)]
pub async fn update_property(
    State(service): State<Arc<PropertyService>>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<PropertyWriteResponseDto>>> {
    let (payload, files) = read_multipart::<UpdatePropertyDto>(&mut multipart).await?;
    let dto = payload.unwrap_or_default();

    let (property, outcome) = service
        .update(&id, dto, files)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Property '{}' not found", id)))?;

    Ok(Json(ApiResponse::success(
        Some(PropertyWriteResponseDto {
            property: property.into(),
            uploads: outcome.into(),
        }),
        None,
        None,
    )))
}

/// Delete a property and purge its media directory
#[utoipa::path(
    delete,
    path = "/api/properties/{id}",
    tag = "properties",
    params(("id" = String, Path, description = "Property id")),
    responses(
        (status = 200, description = "Property deleted", body = ApiResponse<DeletePropertyResponseDto>),
        (status = 404, description = "Property not found")
    )
)]
pub async fn delete_property(
    State(service): State<Arc<PropertyService>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeletePropertyResponseDto>>> {
    if !service.delete(&id).await? {
        return Err(AppError::NotFound(format!("Property '{}' not found", id)));
    }

    Ok(Json(ApiResponse::success(
        Some(DeletePropertyResponseDto { deleted: true }),
        Some("Property deleted successfully".to_string()),
        None,
    )))
}

/// Pull the JSON record payload and the keyed file parts out of a
/// multipart request. Unknown fields are ignored.
async fn read_multipart<T: DeserializeOwned>(
    multipart: &mut Multipart,
) -> Result<(Option<T>, Vec<UploadedFile>)> {
    let mut payload: Option<T> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == RECORD_FIELD_NAME {
            let text = field.text().await.map_err(|e| {
                AppError::BadRequest(format!("Failed to read record payload: {}", e))
            })?;
            payload = Some(
                serde_json::from_str(&text)
                    .map_err(|e| AppError::BadRequest(format!("Invalid record payload: {}", e)))?,
            );
        } else if field_name.starts_with("image-") || field_name.starts_with("video-") {
            let file_name = field
                .file_name()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "unnamed".to_string());
            let content_type = field.content_type().map(|s| s.to_string());

            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read file bytes: {}", e);
                AppError::BadRequest(format!("Failed to read file data: {}", e))
            })?;

            if data.len() > MAX_UPLOAD_FILE_SIZE {
                return Err(AppError::BadRequest(format!(
                    "File '{}' too large. Maximum size is {} bytes ({} MB)",
                    file_name,
                    MAX_UPLOAD_FILE_SIZE,
                    MAX_UPLOAD_FILE_SIZE / 1024 / 1024
                )));
            }

            files.push(UploadedFile {
                key: field_name,
                file_name,
                content_type,
                bytes: data.to_vec(),
            });
        } else {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    Ok((payload, files))
}

/// Post-filter sorts requested via `?sort=`. Both are stable, so ties keep
/// insertion order.
fn sort_properties(mut records: Vec<Property>, sort: SortOption) -> Vec<Property> {
    match sort {
        SortOption::Featured => {
            records.retain(|r| r.featured);
            records.sort_by_key(|r| r.featured_order.unwrap_or(i64::MAX));
        }
        SortOption::Newest => {
            records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::properties::routes;
    use crate::shared::test_helpers::{sample_property, service_fixture};
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::{json, Value};

    fn server(dir: &tempfile::TempDir) -> TestServer {
        let service = Arc::new(service_fixture(dir));
        TestServer::new(routes::routes(service, 10 * 1024 * 1024)).unwrap()
    }

    fn create_form(data: Value) -> MultipartForm {
        MultipartForm::new().add_text(RECORD_FIELD_NAME, data.to_string())
    }

    #[tokio::test]
    async fn create_then_fetch_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(&dir);

        let form = create_form(json!({
            "title": "Lake View Cottage",
            "price": "₹ 95,00,000",
            "location": "Bhimtal, Uttarakhand",
            "category": "buy",
            "propertyType": "villa",
            "specs": {"bedrooms": "3"}
        }));

        let created = server.post("/api/properties").multipart(form).await;
        created.assert_status(StatusCode::CREATED);
        let body: Value = created.json();
        let id = body["data"]["property"]["id"].as_str().unwrap().to_string();

        let fetched = server.get(&format!("/api/properties/{}", id)).await;
        fetched.assert_status_ok();
        let body: Value = fetched.json();
        assert_eq!(body["data"]["title"], "Lake View Cottage");
        assert_eq!(body["data"]["specs"]["bedrooms"], "3");
        // Normalized specs carry the full shape
        assert_eq!(body["data"]["specs"]["naliSize"], "");
    }

    #[tokio::test]
    async fn create_without_payload_field_is_a_bad_request() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(&dir);

        let form = MultipartForm::new().add_text("unrelated", "x");
        let response = server.post("/api/properties").multipart(form).await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn create_with_files_returns_upload_summary_and_serving_urls() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(&dir);

        let form = create_form(json!({
            "title": "Pine Ridge",
            "price": "1.2 Cr",
            "location": "Mukteshwar, Uttarakhand",
            "category": "buy"
        }))
        .add_part(
            "image-0",
            Part::bytes(b"front".to_vec())
                .file_name("Front Elevation.JPG")
                .mime_type("image/jpeg"),
        )
        .add_part(
            "video-0",
            Part::bytes(b"walkthrough".to_vec())
                .file_name("tour.mp4")
                .mime_type("video/mp4"),
        );

        let response = server.post("/api/properties").multipart(form).await;
        response.assert_status(StatusCode::CREATED);

        let body: Value = response.json();
        let uploads = &body["data"]["uploads"];
        assert_eq!(uploads["attempted"], 2);
        assert_eq!(uploads["succeeded"], 2);

        let property = &body["data"]["property"];
        let image_url = property["images"][0].as_str().unwrap();
        assert!(image_url.contains("front-elevation.jpg?t="));
        assert_eq!(property["videoUrl"], property["videoUrls"][0]);
    }

    #[tokio::test]
    async fn filtering_and_sorting_through_the_query_string() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(&dir);

        for (title, price, location, featured_order) in [
            ("Second", "45 L", "Bhimtal, Uttarakhand", Some(2)),
            ("First", "95 L", "Nainital, Uttarakhand", Some(1)),
            ("Plains", "30 L", "Greater Noida", None),
        ] {
            let mut data = json!({
                "title": title,
                "price": price,
                "location": location,
                "category": "buy"
            });
            if let Some(order) = featured_order {
                data["featured"] = json!(true);
                data["featuredOrder"] = json!(order);
            }
            server
                .post("/api/properties")
                .multipart(create_form(data))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let by_region = server
            .get("/api/properties")
            .add_query_param("location", "Uttarakhand")
            .await;
        by_region.assert_status_ok();
        let body: Value = by_region.json();
        assert_eq!(body["meta"]["total"], 2);

        let by_budget = server
            .get("/api/properties")
            .add_query_param("priceMax", "5000000")
            .await;
        let body: Value = by_budget.json();
        assert_eq!(body["meta"]["total"], 2);

        let featured = server
            .get("/api/properties")
            .add_query_param("sort", "featured")
            .await;
        let body: Value = featured.json();
        assert_eq!(body["meta"]["total"], 2);
        assert_eq!(body["data"][0]["title"], "First");
        assert_eq!(body["data"][1]["title"], "Second");
    }

    #[tokio::test]
    async fn partial_update_and_not_found_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(&dir);

        let created = server
            .post("/api/properties")
            .multipart(create_form(json!({
                "title": "Cottage",
                "price": "95 L",
                "location": "Bhimtal, Uttarakhand",
                "category": "buy"
            })))
            .await;
        let id = created.json::<Value>()["data"]["property"]["id"]
            .as_str()
            .unwrap()
            .to_string();

        let update = create_form(json!({"price": "1.1 Cr"}));
        let updated = server
            .put(&format!("/api/properties/{}", id))
            .multipart(update)
            .await;
        updated.assert_status_ok();
        let body: Value = updated.json();
        assert_eq!(body["data"]["property"]["price"], "1.1 Cr");
        assert_eq!(body["data"]["property"]["title"], "Cottage");

        let missing = server
            .put("/api/properties/nope")
            .multipart(create_form(json!({"price": "1 Cr"})))
            .await;
        missing.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_cascades_and_reports_not_found_for_unknown_ids() {
        let dir = tempfile::tempdir().unwrap();
        let server = server(&dir);

        let form = create_form(json!({
            "title": "Cottage",
            "price": "95 L",
            "location": "Bhimtal, Uttarakhand",
            "category": "buy"
        }))
        .add_part(
            "image-0",
            Part::bytes(b"img".to_vec())
                .file_name("a.jpg")
                .mime_type("image/jpeg"),
        );
        let created = server.post("/api/properties").multipart(form).await;
        let id = created.json::<Value>()["data"]["property"]["id"]
            .as_str()
            .unwrap()
            .to_string();
        let media_dir = dir.path().join("uploads").join(&id);
        assert!(media_dir.exists());

        let deleted = server.delete(&format!("/api/properties/{}", id)).await;
        deleted.assert_status_ok();
        assert_eq!(deleted.json::<Value>()["data"]["deleted"], true);
        assert!(!media_dir.exists());

        let again = server.delete(&format!("/api/properties/{}", id)).await;
        again.assert_status(StatusCode::NOT_FOUND);
    }

    #[test]
    fn featured_sort_keeps_insertion_order_on_ties() {
        let mut a = sample_property("A", "50 L", "Bhimtal, Uttarakhand");
        let mut b = sample_property("B", "60 L", "Bhimtal, Uttarakhand");
        let mut c = sample_property("C", "70 L", "Bhimtal, Uttarakhand");
        a.featured = true;
        a.featured_order = Some(5);
        b.featured = true;
        b.featured_order = Some(5);
        c.featured = true;
        c.featured_order = Some(1);

        let sorted = sort_properties(vec![a, b, c], SortOption::Featured);

        let titles: Vec<&str> = sorted.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
    }
}
