//! Record and event construction for handlers.
//!
//! Resources and concepts are built through their own typed constructors
//! (`Shipment::new`, `Address::new`, ...). The factory covers what needs
//! host-provided inputs: parsed identities, typed relationships, and event
//! envelopes stamped with a fresh id and the transaction clock.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use customsnet_assets::NetworkEvent;
use customsnet_core::{DomainResult, EventId, Relationship, Resource, ResourceId, TransactionId};
use customsnet_events::EventEnvelope;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct Factory {
    clock: Clock,
}

impl Factory {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Factory with a fixed or scripted clock (tests).
    pub fn with_clock(clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        Self {
            clock: Arc::new(clock),
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    pub fn new_id(&self, id: &str) -> DomainResult<ResourceId> {
        ResourceId::new(id)
    }

    pub fn new_relationship<R: Resource>(&self, id: &str) -> DomainResult<Relationship<R>> {
        Ok(Relationship::new(ResourceId::new(id)?))
    }

    pub fn new_event(
        &self,
        transaction_id: TransactionId,
        event: impl Into<NetworkEvent>,
    ) -> EventEnvelope<NetworkEvent> {
        EventEnvelope::new(EventId::new(), transaction_id, event.into())
    }
}

impl Default for Factory {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Factory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Factory").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use customsnet_assets::{CustomsEvent, CustomsStatus, Invoice, Shipment};
    use customsnet_core::DomainError;

    #[test]
    fn relationships_are_typed_and_validated() {
        let factory = Factory::new();
        let rel = factory.new_relationship::<Invoice>("INV_001").unwrap();
        assert_eq!(rel.to_uri(), "resource:org.acme.sample.Invoice#INV_001");

        let err = factory.new_relationship::<Invoice>("").unwrap_err();
        assert!(matches!(err, DomainError::InvalidId(_)));
    }

    #[test]
    fn events_carry_transaction_and_clock() {
        let at = Utc.with_ymd_and_hms(2017, 5, 2, 12, 0, 0).unwrap();
        let factory = Factory::with_clock(move || at);
        let tx = TransactionId::new();

        let envelope = factory.new_event(
            tx,
            CustomsEvent {
                shipment: Relationship::<Shipment>::new(ResourceId::new("SHIP_001").unwrap()),
                old_customs_status: CustomsStatus::Uncleared,
                new_customs_status: CustomsStatus::Cleared,
                occurred_at: factory.now(),
            },
        );

        assert_eq!(envelope.transaction_id(), tx);
        assert_eq!(envelope.occurred_at(), at);
        assert_eq!(envelope.event_type(), "org.acme.sample.CustomsEvent");
    }
}
