//! Notification events and the publish/subscribe bus that carries them.

pub mod bus;
pub mod dispatch;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use dispatch::{Listener, listen, spawn_listener};
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
