//! Service facade: the only entry point used by the boundary layer.
//!
//! ## Operation flow
//!
//! ```text
//! request
//!   ↓
//! 1. Validate input (no lock taken, nothing mutated on failure)
//!   ↓
//! 2. Lock fleet state, run inventory/ledger/matching logic, collect events
//!   ↓
//! 3. Unlock
//!   ↓
//! 4. Publish collected events (failures are logged, never returned)
//! ```
//!
//! All fleet state sits behind one mutex, so the scan-then-decrement in
//! matching cannot interleave with another request and overbook a vehicle.
//! Events are published outside the lock; a subscriber calling back into the
//! service cannot deadlock it.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use serde::Serialize;

use evpool_core::{GroupId, VehicleId};
use evpool_events::{Event, EventBus};

use crate::error::FleetError;
use crate::event::{FleetEvent, FleetRegistered, GroupDroppedOff, GroupQueued};
use crate::group::{Group, GroupLedger, InMemoryGroupLedger};
use crate::matching::MatchingEngine;
use crate::vehicle::{InMemoryVehicleInventory, Vehicle, VehicleInventory, VehicleRegistration};

/// Result of a journey request.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JourneyOutcome {
    /// The group rides this vehicle.
    Assigned(VehicleId),
    /// No vehicle had room; the group joined the waiting queue.
    Queued,
}

/// Read-only snapshot of the service state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FleetStatus {
    pub vehicles: Vec<Vehicle>,
    pub waiting: Vec<Group>,
    pub riding: usize,
}

#[derive(Debug)]
struct FleetState<I, L> {
    inventory: I,
    ledger: L,
}

/// Fleet registration, journey matching, drop-off and lookup.
#[derive(Debug)]
pub struct FleetService<B, I = InMemoryVehicleInventory, L = InMemoryGroupLedger> {
    state: Mutex<FleetState<I, L>>,
    engine: MatchingEngine,
    bus: B,
}

impl<B> FleetService<B> {
    /// In-memory service with first-fit matching.
    pub fn new(bus: B) -> Self {
        Self::with_parts(
            bus,
            InMemoryVehicleInventory::new(),
            InMemoryGroupLedger::new(),
            MatchingEngine::default(),
        )
    }
}

impl<B, I, L> FleetService<B, I, L> {
    pub fn with_parts(bus: B, inventory: I, ledger: L, engine: MatchingEngine) -> Self {
        Self {
            state: Mutex::new(FleetState { inventory, ledger }),
            engine,
            bus,
        }
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    fn state(&self) -> MutexGuard<'_, FleetState<I, L>> {
        // Mutations never panic halfway, so a poisoned state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B, I, L> FleetService<B, I, L>
where
    B: EventBus<FleetEvent>,
    I: VehicleInventory,
    L: GroupLedger,
{
    /// Replace the whole fleet and forget every waiting and riding group.
    pub fn register_fleet(&self, vehicles: Vec<VehicleRegistration>) -> Result<(), FleetError> {
        let mut seen = HashSet::with_capacity(vehicles.len());
        if let Some(dup) = vehicles.iter().find(|v| !seen.insert(v.id)) {
            return Err(FleetError::invalid_payload(format!(
                "duplicate vehicle id {}",
                dup.id
            )));
        }

        let fleet: Vec<Vehicle> = vehicles.into_iter().map(Vehicle::from).collect();
        let event = FleetRegistered {
            vehicle_count: fleet.len(),
            total_seats: fleet.iter().map(|v| u64::from(v.capacity())).sum(),
            occurred_at: Utc::now(),
        };

        {
            let mut state = self.state();
            state.inventory.replace_fleet(fleet);
            state.ledger.clear();
        }

        tracing::info!(
            vehicles = event.vehicle_count,
            seats = event.total_seats,
            "fleet registered"
        );
        self.publish_all(vec![FleetEvent::FleetRegistered(event)]);
        Ok(())
    }

    /// Seat the group on the first vehicle with room, or queue it.
    pub fn request_journey(&self, group: Group) -> Result<JourneyOutcome, FleetError> {
        let mut outbox = Vec::new();

        let outcome = {
            let mut state = self.state();
            let FleetState { inventory, ledger } = &mut *state;

            if ledger.is_active(group.id()) {
                return Err(FleetError::Conflict(format!(
                    "group {} already has a pending or active journey",
                    group.id()
                )));
            }

            match self.engine.assign_vehicle(inventory, &group, &mut outbox) {
                Some(vehicle_id) => {
                    ledger.assign(group, vehicle_id);
                    JourneyOutcome::Assigned(vehicle_id)
                }
                None => {
                    ledger.enqueue(group);
                    outbox.push(FleetEvent::GroupQueued(GroupQueued {
                        group_id: group.id(),
                        people: group.people(),
                        occurred_at: Utc::now(),
                    }));
                    JourneyOutcome::Queued
                }
            }
        };

        match outcome {
            JourneyOutcome::Assigned(vehicle_id) => {
                tracing::debug!(group_id = %group.id(), vehicle_id = %vehicle_id, people = group.people(), "journey started");
            }
            JourneyOutcome::Queued => {
                tracing::debug!(group_id = %group.id(), people = group.people(), "no vehicle available; group queued");
            }
        }

        self.publish_all(outbox);
        Ok(outcome)
    }

    /// End a riding group's journey and return the vehicle it left.
    ///
    /// Only groups with a current assignment can be dropped off; a waiting or
    /// unknown id is `NotFound` and stays where it is. Waiting groups are not
    /// promoted onto the freed seats.
    pub fn drop_off(&self, group_id: GroupId) -> Result<VehicleId, FleetError> {
        let vehicle_id = {
            let mut state = self.state();
            let FleetState { inventory, ledger } = &mut *state;

            let riding = ledger.unassign(group_id).ok_or(FleetError::NotFound)?;
            self.engine
                .release_seats(inventory, riding.vehicle_id, riding.group.people());
            riding.vehicle_id
        };

        tracing::debug!(group_id = %group_id, vehicle_id = %vehicle_id, "group dropped off");

        self.publish_all(vec![FleetEvent::GroupDroppedOff(GroupDroppedOff {
            group_id,
            vehicle_id,
            occurred_at: Utc::now(),
        })]);
        Ok(vehicle_id)
    }

    /// Vehicle currently carrying the group; `None` while waiting or unknown.
    pub fn locate_group(&self, group_id: GroupId) -> Option<VehicleId> {
        self.state().ledger.assignment_of(group_id)
    }

    pub fn status(&self) -> FleetStatus {
        let state = self.state();
        FleetStatus {
            vehicles: state.inventory.list_vehicles(),
            waiting: state.ledger.waiting(),
            riding: state.ledger.riding_count(),
        }
    }

    fn publish_all(&self, events: Vec<FleetEvent>) {
        for event in events {
            let event_type = event.event_type();
            if let Err(e) = self.bus.publish(event) {
                tracing::warn!(event_type, error = %e, "notification publish failed");
            }
        }
    }
}
