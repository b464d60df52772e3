use serde::{Deserialize, Serialize};

use evpool_core::VehicleId;

/// A vehicle as submitted by a fleet registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRegistration {
    pub id: VehicleId,
    pub seats: u32,
}

/// A registered vehicle and its seat bookkeeping.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    capacity: u32,
    remaining_seats: u32,
}

impl Vehicle {
    /// A vehicle with every seat free.
    pub fn new(id: VehicleId, seats: u32) -> Self {
        Self {
            id,
            capacity: seats,
            remaining_seats: seats,
        }
    }

    pub fn id(&self) -> VehicleId {
        self.id
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn remaining_seats(&self) -> u32 {
        self.remaining_seats
    }

    pub fn occupied_seats(&self) -> u32 {
        self.capacity.saturating_sub(self.remaining_seats)
    }

    /// Whether `people` riders fit into the free seats.
    pub fn fits(&self, people: u32) -> bool {
        self.remaining_seats >= people
    }
}

impl From<VehicleRegistration> for Vehicle {
    fn from(value: VehicleRegistration) -> Self {
        Self::new(value.id, value.seats)
    }
}

/// Holds the fleet and each vehicle's remaining seats.
///
/// Order matters: `vehicles()` yields registration order, which is the order
/// the matcher scans.
pub trait VehicleInventory: Send {
    /// Current fleet, in registration order.
    fn vehicles(&self) -> &[Vehicle];

    /// Discard the whole fleet and install `vehicles` in its place.
    fn replace_fleet(&mut self, vehicles: Vec<Vehicle>);

    /// Overwrite the remaining seats of one vehicle.
    ///
    /// Unknown ids are ignored. The value is not checked against capacity;
    /// callers pass something within `[0, capacity]`.
    fn set_remaining_seats(&mut self, vehicle_id: VehicleId, seats: u32);

    /// Snapshot of the current fleet.
    fn list_vehicles(&self) -> Vec<Vehicle> {
        self.vehicles().to_vec()
    }

    fn vehicle(&self, vehicle_id: VehicleId) -> Option<Vehicle> {
        self.vehicles().iter().find(|v| v.id == vehicle_id).copied()
    }
}

/// In-memory fleet storage.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InMemoryVehicleInventory {
    vehicles: Vec<Vehicle>,
}

impl InMemoryVehicleInventory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VehicleInventory for InMemoryVehicleInventory {
    fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    fn replace_fleet(&mut self, vehicles: Vec<Vehicle>) {
        self.vehicles = vehicles;
    }

    fn set_remaining_seats(&mut self, vehicle_id: VehicleId, seats: u32) {
        if let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id == vehicle_id) {
            vehicle.remaining_seats = seats;
        }
    }
}
