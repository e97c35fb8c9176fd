use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;
use stockroom_infra::InventoryError;

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    match err {
        InventoryError::InvalidIdentifier(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        InventoryError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        InventoryError::InsertFailed(msg) => json_error(StatusCode::BAD_REQUEST, "insert_failed", msg),
        InventoryError::InvalidItem(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        InventoryError::StorageUnavailable(msg) => {
            tracing::error!("storage unavailable: {msg}");
            json_error(
                StatusCode::SERVICE_UNAVAILABLE,
                "storage_unavailable",
                "inventory storage is unavailable",
            )
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
