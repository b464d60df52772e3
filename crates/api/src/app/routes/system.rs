use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use crate::app::dto;
use crate::app::services::AppServices;

/// Readiness probe.
pub async fn status() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ready" })))
}

pub async fn fleet_status(Extension(services): Extension<Arc<AppServices>>) -> impl IntoResponse {
    Json(dto::status_to_json(services.fleet().status()))
}
