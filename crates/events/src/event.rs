use chrono::{DateTime, Utc};

/// An event raised by a transaction.
///
/// Payloads are facts about a committed mutation: never edited after
/// emission, and never stored by the transaction that raised them.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Fully-qualified type in the model namespace (e.g. "org.acme.sample.CustomsEvent").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    /// When the mutation the event describes took place.
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Unqualified type name ("CustomsEvent").
    fn name(&self) -> &'static str {
        let fqn = self.event_type();
        fqn.rsplit('.').next().unwrap_or(fqn)
    }
}
