//! Browser-facing routes under `/app`.
//!
//! Every handler is scoped to the cookie owner and answers with the JSON view
//! model a page template would be rendered from.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form, Path, Query},
    http::StatusCode,
    response::{IntoResponse, Redirect},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::Utc;

use stockroom_core::OwnerId;
use stockroom_infra::InventoryError;
use stockroom_inventory::Item;

use crate::app::{dto, errors};
use crate::app::services::AppServices;
use crate::context::OwnerContext;

pub fn router() -> Router {
    Router::new()
        .route("/app", get(inventory_page))
        .route("/app/", get(inventory_page))
        .route("/app/items", get(more_items))
        .route("/app/search", post(search))
        .route("/app/item/:id", get(view_item))
        .route("/app/edit-item/:id", get(edit_item))
        .route("/app/add-item", post(add_item))
        .route("/app/update-item/:id", put(update_item))
        .route("/app/delete-item/:id", delete(delete_item))
}

/// Search when a term is present, plain listing otherwise.
async fn fetch_page(
    services: &AppServices,
    owner_id: &OwnerId,
    search: Option<&str>,
    page: i64,
) -> Result<Vec<Item>, InventoryError> {
    let page_size = services.config().items_per_page;
    match search {
        Some(term) => services.inventory().search(owner_id, term, page, page_size).await,
        None => services.inventory().list_page(owner_id, page, page_size).await,
    }
}

pub async fn inventory_page(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Query(query): Query<dto::PageQuery>,
) -> axum::response::Response {
    let page = query.page.unwrap_or(1);

    match fetch_page(&services, owner.owner_id(), None, page).await {
        Ok(items) => (StatusCode::OK, Json(dto::page_view(&items, page, None))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

/// Infinite-scroll continuation: the next page, honoring an active search.
pub async fn more_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Query(query): Query<dto::MoreItemsQuery>,
) -> axum::response::Response {
    let search = dto::clean_search(query.search.as_deref());

    match fetch_page(&services, owner.owner_id(), search, query.page).await {
        Ok(items) => (StatusCode::OK, Json(dto::page_view(&items, query.page, search))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Form(form): Form<dto::SearchForm>,
) -> axum::response::Response {
    let search = dto::clean_search(form.search.as_deref());

    match fetch_page(&services, owner.owner_id(), search, 1).await {
        Ok(items) => (StatusCode::OK, Json(dto::page_view(&items, 1, search))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn view_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.inventory().get_by_id(&id).await {
        Ok(item) => (StatusCode::OK, Json(dto::item_view(&item, false))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn edit_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.inventory().get_by_id(&id).await {
        Ok(item) => (StatusCode::OK, Json(dto::item_view(&item, true))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Form(form): Form<dto::AddItemForm>,
) -> axum::response::Response {
    let item = match form.into_new_item(owner.owner_id(), Utc::now()) {
        Ok(item) => item,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory().create(item).await {
        Ok(_) => Redirect::to("/").into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

/// Apply the edit form and answer with the refreshed row.
///
/// Writing an item also hands it to the current cookie owner.
pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<OwnerContext>,
    Path(id): Path<String>,
    Form(form): Form<dto::UpdateItemForm>,
) -> axum::response::Response {
    let patch = match form.into_patch(owner.owner_id(), Utc::now()) {
        Ok(patch) => patch,
        Err(e) => return errors::domain_error_to_response(e),
    };

    if let Err(e) = services.inventory().update(&id, patch).await {
        return errors::inventory_error_to_response(e);
    }

    match services.inventory().get_by_id(&id).await {
        Ok(item) => (StatusCode::OK, Json(dto::item_view(&item, false))).into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}

/// Idempotent: deleting an absent item still answers 200.
pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.inventory().delete(&id).await {
        Ok(_) => StatusCode::OK.into_response(),
        Err(e) => errors::inventory_error_to_response(e),
    }
}
