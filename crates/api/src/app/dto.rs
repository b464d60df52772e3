use serde::Deserialize;

use evpool_core::{GroupId, VehicleId};
use evpool_fleet::{FleetError, FleetStatus, Group, VehicleRegistration};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct VehicleRequest {
    pub id: VehicleId,
    pub seats: u32,
}

impl From<VehicleRequest> for VehicleRegistration {
    fn from(value: VehicleRequest) -> Self {
        VehicleRegistration {
            id: value.id,
            seats: value.seats,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JourneyRequest {
    pub id: GroupId,
    pub people: u32,
}

impl TryFrom<JourneyRequest> for Group {
    type Error = FleetError;

    fn try_from(value: JourneyRequest) -> Result<Self, Self::Error> {
        Ok(Group::new(value.id, value.people)?)
    }
}

/// Body of `/dropoff` and `/locate`.
#[derive(Debug, Deserialize)]
pub struct GroupRef {
    pub id: GroupId,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn status_to_json(status: FleetStatus) -> serde_json::Value {
    serde_json::json!({
        "vehicles": status
            .vehicles
            .iter()
            .map(|v| serde_json::json!({
                "id": v.id(),
                "seats": v.capacity(),
                "available_seats": v.remaining_seats(),
            }))
            .collect::<Vec<_>>(),
        "waiting": status.waiting.iter().map(|g| g.id()).collect::<Vec<_>>(),
        "riding": status.riding,
    })
}
