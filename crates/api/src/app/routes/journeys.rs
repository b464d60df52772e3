use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use evpool_fleet::{Group, JourneyOutcome};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

/// `POST /journey`: 200 with the car when seated, 202 when queued.
pub async fn request_journey(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::JourneyRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    let group = match Group::try_from(body) {
        Ok(g) => g,
        Err(e) => return errors::fleet_error_to_response(e),
    };

    match services.fleet().request_journey(group) {
        Ok(JourneyOutcome::Assigned(car_id)) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Journey started", "car_id": car_id })),
        )
            .into_response(),
        Ok(JourneyOutcome::Queued) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "message": "Added to waitlist" })),
        )
            .into_response(),
        Err(e) => errors::fleet_error_to_response(e),
    }
}

/// `POST /dropoff`: release the group's seats; 404 unless it is riding.
pub async fn drop_off(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::GroupRef>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.fleet().drop_off(body.id) {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Group dropped off" })),
        )
            .into_response(),
        Err(e) => errors::fleet_error_to_response(e),
    }
}

/// `POST /locate`: 200 with the car while riding, 204 otherwise.
pub async fn locate(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::GroupRef>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.fleet().locate_group(body.id) {
        Some(car_id) => (StatusCode::OK, Json(serde_json::json!({ "car_id": car_id }))).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
