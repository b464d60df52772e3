//! Fleet domain: seat inventory, waiting groups, first-fit matching.
//!
//! This crate holds the business rules of the service as deterministic,
//! in-memory logic (no HTTP, no storage). [`FleetService`] is the single
//! entry point the boundary layer talks to.

pub mod error;
pub mod event;
pub mod group;
pub mod matching;
pub mod service;
pub mod vehicle;

pub use error::FleetError;
pub use event::{FleetEvent, FleetRegistered, GroupDroppedOff, GroupQueued, VehicleAssigned};
pub use group::{Group, GroupLedger, InMemoryGroupLedger, RidingGroup};
pub use matching::{FirstFit, MatchingEngine, SeatMatcher};
pub use service::{FleetService, FleetStatus, JourneyOutcome};
pub use vehicle::{InMemoryVehicleInventory, Vehicle, VehicleInventory, VehicleRegistration};
