use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;
use stockroom_infra::StoreError;

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation { field, reason } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "success": false,
                "error": "validation_error",
                "field": field,
                "message": reason,
            })),
        )
            .into_response(),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        DomainError::InvalidReference(msg) => json_error(StatusCode::CONFLICT, "invalid_reference", msg),
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
        StoreError::InvalidReference(msg) => json_error(StatusCode::CONFLICT, "invalid_reference", msg),
        StoreError::Unavailable(detail) => {
            tracing::error!(%detail, "storage unavailable");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "storage_unavailable",
                "storage is unavailable, try again later",
            )
        }
    }
}

/// Malformed or mistyped JSON bodies are validation failures, not framework errors.
pub fn json_rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn query_rejection_to_response(rejection: QueryRejection) -> axum::response::Response {
    json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
