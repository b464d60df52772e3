use std::sync::Arc;

use evpool_events::{InMemoryEventBus, Listener, listen};
use evpool_fleet::{FleetEvent, FleetService};

pub type FleetBus = InMemoryEventBus<FleetEvent>;
pub type Fleet = FleetService<Arc<FleetBus>>;

/// Everything the handlers need, shared behind an `Arc`.
#[derive(Debug)]
pub struct AppServices {
    fleet: Fleet,
    listeners: Vec<Listener>,
}

impl AppServices {
    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }
}

/// In-memory wiring: bus + fleet service + notification listeners.
pub fn build_services() -> anyhow::Result<AppServices> {
    let bus: Arc<FleetBus> = Arc::new(InMemoryEventBus::new());
    let fleet = FleetService::new(bus.clone());

    // Assignment notifications are only logged here; SMS/email senders would subscribe the same way.
    let assigned = listen(&*bus, FleetEvent::VEHICLE_ASSIGNED, |event: &FleetEvent| {
        if let FleetEvent::VehicleAssigned(e) = event {
            tracing::info!(
                group_id = %e.group_id,
                vehicle_id = %e.vehicle_id,
                people = e.people,
                "group assigned to vehicle"
            );
        }
        Ok(())
    })?;

    Ok(AppServices {
        fleet,
        listeners: vec![assigned],
    })
}
