use std::sync::Arc;

use axum::{
    extract::Extension,
    response::{IntoResponse, Redirect},
    routing::post,
    Router,
};
use chrono::Utc;

use stockroom_inventory::demo_catalogue;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/demo/insert", post(insert_demo_items))
        .route("/demo/insert/", post(insert_demo_items))
}

/// Seed the demo catalogue into the caller's inventory, then go home.
pub async fn insert_demo_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
) -> axum::response::Response {
    let items = demo_catalogue(owner.owner_id(), Utc::now());

    match services.inventory().create_many(items).await {
        Ok(batch) => {
            tracing::info!(owner_id = %owner.owner_id(), inserted = batch.inserted.len(), "seeded demo items");
            Redirect::to("/").into_response()
        }
        Err(e) => errors::inventory_error_to_response(e),
    }
}
