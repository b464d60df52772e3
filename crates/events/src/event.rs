use chrono::{DateTime, Utc};

/// A domain-agnostic notification event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **named** (subscribers register interest by `event_type`)
/// - **versioned** (schema evolution)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name used as the subscription key (e.g. "vehicle.assigned").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred.
    fn occurred_at(&self) -> DateTime<Utc>;
}
