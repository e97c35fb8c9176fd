use axum::{
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Json,
};

use crate::context::OwnerContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn root() -> Redirect {
    Redirect::to("/app/")
}

pub async fn whoami(Extension(owner): Extension<OwnerContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "owner_id": owner.owner_id().as_str(),
    }))
}
