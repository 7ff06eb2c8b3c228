use chrono::{DateTime, Utc};

/// A domain-agnostic event.
///
/// Events are immutable facts and carry a schema version so consumers of the
/// record-persistence layer can evolve independently.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "purchasing.request.submitted").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
