//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: fleet service, notification bus and its listeners
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app() -> anyhow::Result<Router> {
    let services = Arc::new(services::build_services()?);
    Ok(router(services))
}

/// Router over an existing set of services.
pub fn router(services: Arc<services::AppServices>) -> Router {
    routes::router()
        .layer(Extension(services))
        .layer(ServiceBuilder::new())
}
