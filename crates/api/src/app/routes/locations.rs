use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
};
use chrono::Utc;

use stockroom_core::LocationId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/locations", get(list_locations).post(create_location))
        .route("/locations/:id", put(rename_location).delete(delete_location))
}

pub async fn list_locations(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.store().list_locations().await {
        Ok(locations) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "count": locations.len(),
                "data": locations,
                "timestamp": Utc::now().to_rfc3339(),
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn create_location(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::LocationRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let new_location = match body.into_new_location() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().create_location(new_location).await {
        Ok(location) => {
            tracing::info!(location_id = %location.id, "location created");
            (
                StatusCode::CREATED,
                Json(serde_json::json!({
                    "success": true,
                    "data": location,
                    "message": "Location created successfully",
                })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn rename_location(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::LocationRequest>, JsonRejection>,
) -> axum::response::Response {
    let id: LocationId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid location id"),
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let new_location = match body.into_new_location() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().rename_location(id, new_location).await {
        Ok(location) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "data": location,
                "message": "Location updated successfully",
            })),
        )
            .into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// Rejected with 409 while the location still holds items.
pub async fn delete_location(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: LocationId = match id.parse() {
        Ok(v) => v,
        Err(_) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid location id"),
    };

    match services.store().delete_location(id).await {
        Ok(()) => {
            tracing::info!(location_id = %id, "location deleted");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": "Location deleted successfully",
                })),
            )
                .into_response()
        }
        Err(e) => errors::store_error_to_response(e),
    }
}
