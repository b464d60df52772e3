use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use evpool_core::{GroupId, VehicleId};
use evpool_events::Event;

/// The fleet was replaced; every earlier journey is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FleetRegistered {
    pub vehicle_count: usize,
    pub total_seats: u64,
    pub occurred_at: DateTime<Utc>,
}

/// A group took seats on a vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleAssigned {
    pub group_id: GroupId,
    pub vehicle_id: VehicleId,
    pub people: u32,
    pub occurred_at: DateTime<Utc>,
}

/// No vehicle had room; the group joined the waiting queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupQueued {
    pub group_id: GroupId,
    pub people: u32,
    pub occurred_at: DateTime<Utc>,
}

/// A riding group left its vehicle and the seats were given back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDroppedOff {
    pub group_id: GroupId,
    pub vehicle_id: VehicleId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FleetEvent {
    FleetRegistered(FleetRegistered),
    VehicleAssigned(VehicleAssigned),
    GroupQueued(GroupQueued),
    GroupDroppedOff(GroupDroppedOff),
}

impl FleetEvent {
    pub const FLEET_REGISTERED: &'static str = "fleet.registered";
    pub const VEHICLE_ASSIGNED: &'static str = "vehicle.assigned";
    pub const GROUP_QUEUED: &'static str = "group.queued";
    pub const GROUP_DROPPED_OFF: &'static str = "group.dropped_off";
}

impl Event for FleetEvent {
    fn event_type(&self) -> &'static str {
        match self {
            FleetEvent::FleetRegistered(_) => Self::FLEET_REGISTERED,
            FleetEvent::VehicleAssigned(_) => Self::VEHICLE_ASSIGNED,
            FleetEvent::GroupQueued(_) => Self::GROUP_QUEUED,
            FleetEvent::GroupDroppedOff(_) => Self::GROUP_DROPPED_OFF,
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            FleetEvent::FleetRegistered(e) => e.occurred_at,
            FleetEvent::VehicleAssigned(e) => e.occurred_at,
            FleetEvent::GroupQueued(e) => e.occurred_at,
            FleetEvent::GroupDroppedOff(e) => e.occurred_at,
        }
    }
}
