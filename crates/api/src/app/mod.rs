//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: collection + query layer wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request DTOs and JSON view models
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use stockroom_infra::AppConfig;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub async fn build_app(config: AppConfig) -> anyhow::Result<Router> {
    let services = services::build_services(config).await?;
    Ok(build_router(Arc::new(services)))
}

/// Router over already-built services (tests wire in-memory services here).
pub fn build_router(services: Arc<services::AppServices>) -> Router {
    let cookie_state = middleware::OwnerCookieState {
        max_age: services.config().cookie_max_age,
    };

    // Owner-scoped routes: every request carries an anonymous owner.
    let owned = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            cookie_state,
            middleware::owner_cookie_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(owned)
        .layer(ServiceBuilder::new())
}
