//! Transaction execution pipeline.
//!
//! `TransactionProcessor` plays the host's part for one submitted
//! transaction:
//!
//! ```text
//! TransactionRequest
//!   ↓
//! 1. Resolve referenced records through the registries
//!   ↓
//! 2. Build a TransactionContext (registries, factory, bus, transaction id)
//!   ↓
//! 3. Run the handler (mutate → persist → emit)
//!   ↓
//! 4. Record the committed transaction in the historian
//! ```
//!
//! A failure at any step is returned unchanged and nothing is recorded.
//! Rolling back writes a handler already made is the host's concern; the
//! in-memory world state has no transaction boundary of its own.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{info, warn};

use customsnet_assets::{NetworkEvent, SampleAsset, Shipment};
use customsnet_core::{DomainError, TransactionId, TypeName};
use customsnet_events::{EventBus, EventEnvelope};

use crate::context::TransactionContext;
use crate::factory::Factory;
use crate::handlers::{self, SeedSummary};
use crate::registry::{RegistryError, RegistryProvider};
use crate::transaction::{SampleTransaction, ShipmentCustomsReview, TransactionRequest};

/// Why a transaction was rejected.
///
/// Registry failures pass through untouched so the submitter sees the
/// collaborator's own error (not found, duplicate identity, unresolved
/// reference).
#[derive(Debug, Error)]
pub enum TransactionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Outcome of a committed transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionReceipt {
    pub transaction_id: TransactionId,
    pub transaction_type: TypeName,
    pub events: Vec<EventEnvelope<NetworkEvent>>,
    /// Present for `SetupDemo` only.
    pub seeded: Option<SeedSummary>,
}

/// Historian entry for a committed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorianRecord {
    pub transaction_id: TransactionId,
    pub transaction_type: TypeName,
    pub submitted_at: DateTime<Utc>,
    pub event_count: usize,
}

/// Runs submitted transactions against a registry provider and an event bus.
#[derive(Debug)]
pub struct TransactionProcessor<P, B> {
    provider: P,
    bus: B,
    factory: Factory,
    historian: RwLock<Vec<HistorianRecord>>,
}

impl<P, B> TransactionProcessor<P, B> {
    pub fn new(provider: P, bus: B) -> Self {
        Self::with_factory(provider, bus, Factory::new())
    }

    pub fn with_factory(provider: P, bus: B, factory: Factory) -> Self {
        Self {
            provider,
            bus,
            factory,
            historian: RwLock::new(Vec::new()),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Committed transactions, oldest first.
    pub fn history(&self) -> Vec<HistorianRecord> {
        self.historian_read().clone()
    }

    // Records are pushed whole, so a poisoned lock still guards a valid list.
    fn historian_read(&self) -> RwLockReadGuard<'_, Vec<HistorianRecord>> {
        self.historian.read().unwrap_or_else(|poisoned| {
            warn!("historian lock poisoned; recovering");
            poisoned.into_inner()
        })
    }

    fn historian_write(&self) -> RwLockWriteGuard<'_, Vec<HistorianRecord>> {
        self.historian.write().unwrap_or_else(|poisoned| {
            warn!("historian lock poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl<P, B> TransactionProcessor<P, B>
where
    P: RegistryProvider,
    B: EventBus<EventEnvelope<NetworkEvent>>,
{
    pub async fn submit(
        &self,
        request: TransactionRequest,
    ) -> Result<TransactionReceipt, TransactionError> {
        let transaction_id = TransactionId::new();
        let transaction_type = request.transaction_type();
        let submitted_at = self.factory.now();
        let ctx = TransactionContext::new(&self.provider, &self.bus, &self.factory, transaction_id);

        let outcome = self.run(&ctx, request).await;
        let (events, seeded) = match outcome {
            Ok(done) => done,
            Err(e) => {
                warn!(%transaction_id, %transaction_type, "transaction rejected: {e}");
                return Err(e);
            }
        };

        info!(
            %transaction_id,
            %transaction_type,
            events = events.len(),
            "transaction committed"
        );

        self.historian_write().push(HistorianRecord {
            transaction_id,
            transaction_type,
            submitted_at,
            event_count: events.len(),
        });

        Ok(TransactionReceipt {
            transaction_id,
            transaction_type,
            events,
            seeded,
        })
    }

    async fn run(
        &self,
        ctx: &TransactionContext<'_, P, B>,
        request: TransactionRequest,
    ) -> Result<(Vec<EventEnvelope<NetworkEvent>>, Option<SeedSummary>), TransactionError> {
        match request {
            TransactionRequest::SampleTransaction {
                asset_id,
                new_value,
            } => {
                let asset = ctx.asset_registry::<SampleAsset>().await?.get(&asset_id).await?;
                let mut tx = SampleTransaction { asset, new_value };
                let event = handlers::sample_transaction(ctx, &mut tx).await?;
                Ok((vec![event], None))
            }
            TransactionRequest::ShipmentCustomsReview {
                shipment_id,
                review_status,
            } => {
                let shipment = ctx.asset_registry::<Shipment>().await?.get(&shipment_id).await?;
                let mut review = ShipmentCustomsReview {
                    shipment,
                    review_status,
                };
                let event = handlers::review_import_goods(ctx, &mut review).await?;
                Ok((vec![event], None))
            }
            TransactionRequest::SetupDemo(setup) => {
                let summary = handlers::setup_demo(ctx, &setup).await?;
                Ok((vec![], Some(summary)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use customsnet_core::{Resource, ResourceId, ResourceKey};
    use customsnet_events::InMemoryEventBus;

    use crate::transaction::SetupDemo;
    use crate::world::InMemoryWorldState;

    type Bus = Arc<InMemoryEventBus<EventEnvelope<NetworkEvent>>>;

    fn processor() -> TransactionProcessor<InMemoryWorldState, Bus> {
        TransactionProcessor::new(InMemoryWorldState::with_sample_model(), Arc::new(InMemoryEventBus::new()))
    }

    fn rid(s: &str) -> ResourceId {
        ResourceId::new(s).unwrap()
    }

    #[tokio::test]
    async fn sample_transaction_is_resolved_then_applied() {
        let p = processor();
        p.provider()
            .asset_registry::<SampleAsset>()
            .await
            .unwrap()
            .add(SampleAsset::new(rid("ASSET_001"), "10"))
            .await
            .unwrap();

        let receipt = p
            .submit(TransactionRequest::SampleTransaction {
                asset_id: rid("ASSET_001"),
                new_value: "42".into(),
            })
            .await
            .unwrap();

        assert_eq!(receipt.transaction_type, SampleTransaction::TYPE);
        assert_eq!(receipt.events.len(), 1);
        assert_eq!(receipt.events[0].transaction_id(), receipt.transaction_id);
        assert_eq!(receipt.seeded, None);
    }

    #[tokio::test]
    async fn unknown_asset_is_not_found_and_not_recorded() {
        let p = processor();
        let sub = p.bus().subscribe();

        let err = p
            .submit(TransactionRequest::SampleTransaction {
                asset_id: rid("GHOST"),
                new_value: "1".into(),
            })
            .await
            .unwrap_err();

        match err {
            TransactionError::Registry(RegistryError::NotFound(key)) => {
                assert_eq!(key, ResourceKey::new(SampleAsset::TYPE, rid("GHOST")));
            }
            other => panic!("Expected NotFound, got {other:?}"),
        }
        assert!(sub.drain().is_empty());
        assert!(p.history().is_empty());
    }

    #[tokio::test]
    async fn historian_keeps_committed_transactions_in_order() {
        let p = processor();
        let setup = p.submit(TransactionRequest::SetupDemo(SetupDemo::default())).await.unwrap();
        assert_eq!(setup.seeded.map(|s| s.shipments), Some(1));

        p.submit(TransactionRequest::ShipmentCustomsReview {
            shipment_id: rid("SHIP_001"),
            review_status: customsnet_assets::CustomsStatus::Cleared,
        })
        .await
        .unwrap();

        // Rejected: already seeded.
        assert!(p.submit(TransactionRequest::SetupDemo(SetupDemo::default())).await.is_err());

        let history = p.history();
        let types: Vec<String> = history.iter().map(|h| h.transaction_type.to_string()).collect();
        assert_eq!(
            types,
            vec!["org.acme.sample.SetupDemo", "org.acme.sample.ShipmentCustomsReview"]
        );
        assert_eq!(history[0].event_count, 0);
        assert_eq!(history[1].event_count, 1);
        assert_eq!(history[0].transaction_id, setup.transaction_id);
    }

    #[tokio::test]
    async fn poisoned_historian_still_records_commits() {
        let p = processor();
        p.submit(TransactionRequest::SetupDemo(SetupDemo::default())).await.unwrap();

        let poisoner = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = p.historian.write().unwrap();
            panic!("writer died holding the historian");
        }));
        assert!(poisoner.is_err());
        assert!(p.historian.is_poisoned());

        p.submit(TransactionRequest::ShipmentCustomsReview {
            shipment_id: rid("SHIP_001"),
            review_status: customsnet_assets::CustomsStatus::Held,
        })
        .await
        .unwrap();

        let history = p.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].transaction_type, ShipmentCustomsReview::TYPE);
    }
}
