//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is a pub/sub mechanism keyed by event name. Publishers hand a
//! message to the bus and return immediately; each subscriber registered for
//! the message's name receives its own copy on its own channel.
//!
//! ## Delivery contract
//!
//! - **Fire-and-forget**: `publish()` never waits for a subscriber to process a message
//! - **Per-subscriber FIFO**: one subscriber sees messages in publication order
//! - **No cross-subscriber ordering**: subscribers consume independently
//! - **No persistence**: messages published before a subscription exists are not replayed
//!
//! Subscriber failures never travel back to the publisher; see
//! [`crate::dispatch`] for the boundary that absorbs them.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to one event name.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = bus.subscribe("vehicle.assigned");
///
/// loop {
///     match subscription.recv_timeout(Duration::from_secs(1)) {
///         Ok(event) => process(event)?,
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,  // Bus dropped
///     }
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption. Hand one to
/// [`crate::spawn_listener`] to run a callback on a dedicated thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Name-keyed event bus (pub/sub abstraction).
///
/// ```text
/// FleetService ── publish(VehicleAssigned) ──> bus ──┬─> subscriber "vehicle.assigned" #1
///                                                    └─> subscriber "vehicle.assigned" #2
/// ```
///
/// `publish()` only fails when the bus itself is unusable (e.g. a poisoned
/// lock). Callers that must not fail because of notification problems log the
/// error and carry on.
///
/// The trait requires `Send + Sync`: many request handlers publish concurrently.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + core::fmt::Display + Send + Sync + 'static;

    /// Hand `message` to every subscriber of its event name.
    fn publish(&self, message: M) -> Result<(), Self::Error>;

    /// Register a new subscriber for `event_type`.
    fn subscribe(&self, event_type: &str) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self, event_type: &str) -> Subscription<M> {
        (**self).subscribe(event_type)
    }
}
