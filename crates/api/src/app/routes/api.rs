//! JSON API: read and bulk-write access for scripts and tests.
//!
//! These endpoints take the owner from a `user_id` query parameter rather
//! than the cookie, so a client can address any inventory it knows the token
//! of.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use stockroom_core::OwnerId;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// Upper bound on `/api/items`; the listing is not paginated.
pub const API_LIST_LIMIT: u32 = 100;

pub fn router() -> Router {
    Router::new()
        .route("/api/items", get(list_items))
        .route("/api/item/:id", get(get_item))
        .route("/api/insert", post(insert_items))
        .route("/api/insert/", post(insert_items))
        .route("/api/cleanup", post(cleanup))
}

pub async fn list_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::OwnerQuery>,
) -> axum::response::Response {
    let owner_id = OwnerId::from(query.user_id);

    match services.inventory().list_page(&owner_id, 1, API_LIST_LIMIT).await {
        Ok(items) => (
            StatusCode::OK,
            Json(items.iter().map(dto::item_to_json).collect::<Vec<_>>()),
        )
            .into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.inventory().get_by_id(&id).await {
        Ok(item) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn insert_items(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::OwnerQuery>,
    Json(body): Json<Vec<dto::ApiItemInput>>,
) -> axum::response::Response {
    let owner_id = OwnerId::from(query.user_id);
    let now = Utc::now();
    let items = body
        .into_iter()
        .map(|input| input.into_new_item(&owner_id, now))
        .collect();

    match services.inventory().create_many(items).await {
        Ok(batch) => (StatusCode::CREATED, Json(dto::batch_to_json(&batch))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

/// Retention sweep: drop every item not written within the retention window.
pub async fn cleanup(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    let cutoff = Utc::now() - services.config().retention;

    match services.inventory().purge_older_than(cutoff).await {
        Ok(removed) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Old Item removed",
                "removed": removed,
                "cutoff": cutoff.to_rfc3339(),
            })),
        )
            .into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
