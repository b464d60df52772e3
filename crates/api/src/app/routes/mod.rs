use axum::{
    routing::{get, post, put},
    Router,
};

pub mod fleet;
pub mod journeys;
pub mod system;

/// Router for every endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/status", get(system::status))
        .route("/fleet", get(system::fleet_status))
        .route("/evs", put(fleet::register_evs))
        .route("/journey", post(journeys::request_journey))
        .route("/dropoff", post(journeys::drop_off))
        .route("/locate", post(journeys::locate))
}
