//! Subscriber dispatch: runs callbacks off the publisher's thread.
//!
//! Each listener owns one [`Subscription`] and one named OS thread. The thread
//! drains the subscription in order and invokes the callback for each message.
//! Callback errors and panics are caught here, logged, and the listener moves
//! on to the next message. Nothing is reported back to the publisher.
//!
//! A listener exits once every sending half of its subscription is gone, which
//! happens when the bus is dropped.

use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::thread::{self, JoinHandle};

use crate::bus::{EventBus, Subscription};

/// Handle to a running listener thread.
#[derive(Debug)]
pub struct Listener {
    name: String,
    handle: JoinHandle<()>,
}

impl Listener {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Wait for the listener to exit (only returns after the bus is dropped).
    pub fn join(self) -> thread::Result<()> {
        self.handle.join()
    }
}

/// Subscribe to `event_type` on `bus` and run `handler` for every message.
pub fn listen<M, B, F>(bus: &B, event_type: &str, handler: F) -> io::Result<Listener>
where
    M: Send + 'static,
    B: EventBus<M> + ?Sized,
    F: FnMut(&M) -> anyhow::Result<()> + Send + 'static,
{
    spawn_listener(event_type, bus.subscribe(event_type), handler)
}

/// Run `handler` for every message arriving on `subscription`, on a new thread.
pub fn spawn_listener<M, F>(
    name: impl Into<String>,
    subscription: Subscription<M>,
    mut handler: F,
) -> io::Result<Listener>
where
    M: Send + 'static,
    F: FnMut(&M) -> anyhow::Result<()> + Send + 'static,
{
    let name = name.into();
    let label = name.clone();

    let handle = thread::Builder::new()
        .name(format!("listener:{name}"))
        .spawn(move || {
            while let Ok(message) = subscription.recv() {
                deliver(&label, &mut handler, &message);
            }
            tracing::debug!(listener = %label, "bus closed, listener exiting");
        })?;

    Ok(Listener { name, handle })
}

fn deliver<M, F>(label: &str, handler: &mut F, message: &M)
where
    F: FnMut(&M) -> anyhow::Result<()>,
{
    match panic::catch_unwind(AssertUnwindSafe(|| handler(message))) {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(listener = %label, error = %e, "subscriber failed; notification dropped");
        }
        Err(_) => {
            tracing::warn!(listener = %label, "subscriber panicked; notification dropped");
        }
    }
}
