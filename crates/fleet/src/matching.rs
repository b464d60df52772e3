//! Vehicle assignment.
//!
//! The engine asks a [`SeatMatcher`] which vehicle should carry a group, takes
//! the seats on that vehicle, and records a `VehicleAssigned` notification in
//! the caller's outbox. Publishing the outbox is the caller's job, once its
//! critical section is over.
//!
//! Waiting groups are never promoted here: freeing seats only restores
//! capacity, and queued groups stay queued until they are dropped or the fleet
//! is re-registered.

use chrono::Utc;

use evpool_core::VehicleId;

use crate::event::{FleetEvent, VehicleAssigned};
use crate::group::Group;
use crate::vehicle::{Vehicle, VehicleInventory};

/// Chooses a vehicle for a group of `people` riders.
pub trait SeatMatcher: Send + Sync {
    /// Stable name for logs.
    fn name(&self) -> &'static str;

    /// Pick a vehicle from `fleet` (registration order) with at least `people` free seats.
    fn find_vehicle(&self, fleet: &[Vehicle], people: u32) -> Option<VehicleId>;
}

/// First vehicle in registration order with enough free seats.
///
/// No attempt is made to minimise wasted seats or balance load.
///
/// Time complexity: O(n) in the fleet size.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstFit;

impl SeatMatcher for FirstFit {
    fn name(&self) -> &'static str {
        "first_fit"
    }

    fn find_vehicle(&self, fleet: &[Vehicle], people: u32) -> Option<VehicleId> {
        fleet.iter().find(|v| v.fits(people)).map(Vehicle::id)
    }
}

pub struct MatchingEngine {
    matcher: Box<dyn SeatMatcher>,
}

impl MatchingEngine {
    pub fn new(matcher: Box<dyn SeatMatcher>) -> Self {
        Self { matcher }
    }

    pub fn matcher_name(&self) -> &'static str {
        self.matcher.name()
    }

    /// Seat `group` on a vehicle, if one has room.
    ///
    /// On success the vehicle's remaining seats drop by `group.people()` and a
    /// `VehicleAssigned` event is pushed to `outbox`. On `None` nothing changed
    /// and the caller decides what to do with the group.
    pub fn assign_vehicle<I>(
        &self,
        inventory: &mut I,
        group: &Group,
        outbox: &mut Vec<FleetEvent>,
    ) -> Option<VehicleId>
    where
        I: VehicleInventory + ?Sized,
    {
        let vehicle_id = self.matcher.find_vehicle(inventory.vehicles(), group.people())?;
        let vehicle = inventory.vehicle(vehicle_id)?;
        let left = vehicle.remaining_seats().checked_sub(group.people())?;

        inventory.set_remaining_seats(vehicle_id, left);
        outbox.push(FleetEvent::VehicleAssigned(VehicleAssigned {
            group_id: group.id(),
            vehicle_id,
            people: group.people(),
            occurred_at: Utc::now(),
        }));

        Some(vehicle_id)
    }

    /// Give `seats` back to a vehicle.
    ///
    /// `seats` is the people count of the group leaving, which is exactly what
    /// it consumed. The result never exceeds the vehicle's capacity; unknown
    /// vehicles are ignored.
    pub fn release_seats<I>(&self, inventory: &mut I, vehicle_id: VehicleId, seats: u32)
    where
        I: VehicleInventory + ?Sized,
    {
        let Some(vehicle) = inventory.vehicle(vehicle_id) else {
            tracing::warn!(vehicle_id = %vehicle_id, "release for unknown vehicle ignored");
            return;
        };

        let wanted = vehicle.remaining_seats().saturating_add(seats);
        let restored = wanted.min(vehicle.capacity());
        if restored < wanted {
            tracing::warn!(
                vehicle_id = %vehicle_id,
                wanted,
                capacity = vehicle.capacity(),
                "seat release exceeds capacity; clamped"
            );
        }

        inventory.set_remaining_seats(vehicle_id, restored);
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new(Box::new(FirstFit))
    }
}

impl core::fmt::Debug for MatchingEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("matcher", &self.matcher.name())
            .finish()
    }
}
