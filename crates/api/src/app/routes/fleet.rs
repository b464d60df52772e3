use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use evpool_fleet::VehicleRegistration;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// `PUT /evs`: replace the fleet; every waiting and riding group is forgotten.
pub async fn register_evs(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<Vec<dto::VehicleRequest>>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    let vehicles: Vec<VehicleRegistration> = body.into_iter().map(Into::into).collect();

    match services.fleet().register_fleet(vehicles) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "EVs registered successfully" })),
        )
            .into_response(),
        Err(e) => errors::fleet_error_to_response(e),
    }
}
