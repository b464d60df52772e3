use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use evpool_fleet::FleetError;

pub fn fleet_error_to_response(err: FleetError) -> axum::response::Response {
    match err {
        FleetError::InvalidPayload(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_payload", msg),
        FleetError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "Group not found"),
        FleetError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
    }
}

/// Undecodable bodies are always a client error, whatever axum's own status would be.
pub fn rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    tracing::debug!(error = %rejection, "request body rejected");
    json_error(
        StatusCode::BAD_REQUEST,
        "invalid_payload",
        format!("Invalid payload: {}", rejection.body_text()),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
