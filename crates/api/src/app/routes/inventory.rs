use std::sync::Arc;

use axum::{
    Json,
    extract::{Extension, Query, rejection::QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};

use stockroom_inventory::KNOWN_CATEGORIES;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

/// Locations with their (optionally filtered) items.
///
/// No parameters: every location, empty ones included. Any parameter: only
/// locations holding at least one matching item.
pub async fn get_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    query: Result<Query<dto::InventoryQuery>, QueryRejection>,
) -> axum::response::Response {
    let Query(query) = match query {
        Ok(q) => q,
        Err(rejection) => return errors::query_rejection_to_response(rejection),
    };
    let filter = match query.into_filter() {
        Ok(f) => f,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.store().resolve(&filter).await {
        Ok(rows) => (StatusCode::OK, Json(rows)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

pub async fn get_categories() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "categories": KNOWN_CATEGORIES })),
    )
        .into_response()
}
