use axum::{routing::get, Router};

pub mod api;
pub mod demo;
pub mod system;
pub mod webapp;

/// Router for all owner-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/", get(system::root))
        .route("/whoami", get(system::whoami))
        .merge(api::router())
        .merge(demo::router())
        .merge(webapp::router())
}
