use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use customsnet_assets::NetworkEvent;
use customsnet_core::{Resource, TransactionId};
use customsnet_events::{Event, EventBus, EventEnvelope};

use crate::factory::Factory;
use crate::registry::{Registry, RegistryError, RegistryProvider};

/// Capabilities the host hands to one transaction.
///
/// Borrowed for the duration of a single invocation: registries (through the
/// provider), the factory, and the event bus used for emission.
#[derive(Debug)]
pub struct TransactionContext<'a, P, B> {
    provider: &'a P,
    bus: &'a B,
    factory: &'a Factory,
    transaction_id: TransactionId,
}

impl<'a, P, B> TransactionContext<'a, P, B> {
    pub fn new(provider: &'a P, bus: &'a B, factory: &'a Factory, transaction_id: TransactionId) -> Self {
        Self {
            provider,
            bus,
            factory,
            transaction_id,
        }
    }

    pub fn transaction_id(&self) -> TransactionId {
        self.transaction_id
    }

    pub fn factory(&self) -> &Factory {
        self.factory
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.factory.now()
    }
}

impl<P: RegistryProvider, B> TransactionContext<'_, P, B> {
    pub async fn asset_registry<R: Resource>(&self) -> Result<Arc<dyn Registry<R>>, RegistryError> {
        self.provider.asset_registry::<R>().await
    }

    pub async fn participant_registry<R: Resource>(
        &self,
    ) -> Result<Arc<dyn Registry<R>>, RegistryError> {
        self.provider.participant_registry::<R>().await
    }
}

impl<P, B> TransactionContext<'_, P, B>
where
    B: EventBus<EventEnvelope<NetworkEvent>>,
{
    /// Hand an event to the host's distribution mechanism.
    ///
    /// Fire-and-forget: a bus failure is logged and does not fail the
    /// transaction, whose mutation is already committed at this point.
    pub fn emit(&self, event: impl Into<NetworkEvent>) -> EventEnvelope<NetworkEvent> {
        let envelope = self.factory.new_event(self.transaction_id, event);

        match self.bus.publish(envelope.clone()) {
            Ok(()) => debug!(
                transaction_id = %self.transaction_id,
                event = envelope.payload().name(),
                "event emitted"
            ),
            Err(e) => warn!(
                transaction_id = %self.transaction_id,
                event_type = envelope.event_type(),
                "event emission failed: {e}"
            ),
        }

        envelope
    }
}
