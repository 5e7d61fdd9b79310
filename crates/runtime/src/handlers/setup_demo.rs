use tracing::{debug, info};

use customsnet_assets::{Invoice, Shipment};
use customsnet_core::Resource;
use customsnet_participants::{
    CustomsParticipant, ImporterParticipant, LogisticsParticipant, ShipperParticipant,
};

use crate::context::TransactionContext;
use crate::fixture::DemoFixture;
use crate::processor::TransactionError;
use crate::registry::{RegistryError, RegistryProvider};
use crate::transaction::SetupDemo;

/// How many records `setup_demo` wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub participants: usize,
    pub invoices: usize,
    pub shipments: usize,
}

/// Seed the network with the demo fixture.
///
/// Write order is fixed: customs, logistics, importer, shipper, invoices,
/// shipments. Participants go first because invoices reference them, and
/// invoices before the shipments that reference them. The first failing
/// `add_all` ends the setup; groups written before it stay written.
///
/// Not idempotent: running it against a seeded network fails with
/// `DuplicateIdentity` on the customs participants.
pub async fn setup_demo<P, B>(
    ctx: &TransactionContext<'_, P, B>,
    tx: &SetupDemo,
) -> Result<SeedSummary, TransactionError>
where
    P: RegistryProvider,
{
    let fixture = DemoFixture::standard(tx.invoice_count)?;
    let summary = SeedSummary {
        participants: fixture.participant_count(),
        invoices: fixture.invoices.len(),
        shipments: fixture.shipments.len(),
    };

    ctx.participant_registry::<CustomsParticipant>()
        .await?
        .add_all(fixture.customs)
        .await
        .inspect_err(log_seed_failure::<CustomsParticipant>)?;

    ctx.participant_registry::<LogisticsParticipant>()
        .await?
        .add_all(fixture.logistics)
        .await
        .inspect_err(log_seed_failure::<LogisticsParticipant>)?;

    ctx.participant_registry::<ImporterParticipant>()
        .await?
        .add_all(fixture.importers)
        .await
        .inspect_err(log_seed_failure::<ImporterParticipant>)?;

    ctx.participant_registry::<ShipperParticipant>()
        .await?
        .add_all(fixture.shippers)
        .await
        .inspect_err(log_seed_failure::<ShipperParticipant>)?;

    ctx.asset_registry::<Invoice>()
        .await?
        .add_all(fixture.invoices)
        .await
        .inspect_err(log_seed_failure::<Invoice>)?;

    ctx.asset_registry::<Shipment>()
        .await?
        .add_all(fixture.shipments)
        .await
        .inspect_err(log_seed_failure::<Shipment>)?;

    info!(
        transaction_id = %ctx.transaction_id(),
        participants = summary.participants,
        invoices = summary.invoices,
        shipments = summary.shipments,
        "demo network seeded"
    );
    Ok(summary)
}

fn log_seed_failure<R: Resource>(err: &RegistryError) {
    debug!(registry = %R::TYPE, "demo seeding stopped: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use customsnet_assets::NetworkEvent;
    use customsnet_core::{DomainError, ResourceId, ResourceKey, TransactionId};
    use customsnet_events::{EventBus, EventEnvelope, InMemoryEventBus};
    use proptest::prelude::*;

    use crate::factory::Factory;
    use crate::world::InMemoryWorldState;

    type Bus = InMemoryEventBus<EventEnvelope<NetworkEvent>>;

    async fn run(world: &InMemoryWorldState, invoice_count: usize) -> Result<SeedSummary, TransactionError> {
        let bus = Bus::new();
        let factory = Factory::new();
        let ctx = TransactionContext::new(world, &bus, &factory, TransactionId::new());
        setup_demo(&ctx, &SetupDemo { invoice_count }).await
    }

    #[tokio::test]
    async fn seeds_every_registry_without_emitting() {
        let world = InMemoryWorldState::with_sample_model();
        let bus = Bus::new();
        let sub = bus.subscribe();
        let factory = Factory::new();
        let ctx = TransactionContext::new(&world, &bus, &factory, TransactionId::new());

        let summary = setup_demo(&ctx, &SetupDemo::default()).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                participants: 5,
                invoices: 1,
                shipments: 1
            }
        );

        let customs = world.participant_registry::<CustomsParticipant>().await.unwrap();
        assert_eq!(customs.get_all().await.unwrap().len(), 2);
        let invoice = world
            .asset_registry::<Invoice>()
            .await
            .unwrap()
            .get(&ResourceId::new("INV_001").unwrap())
            .await
            .unwrap();
        assert_eq!(invoice.goods_description(), "iPhones");
        assert_eq!(world.index().len().unwrap(), 7);
        assert!(sub.drain().is_empty());
    }

    #[tokio::test]
    async fn second_run_fails_on_first_participant_insert() {
        let world = InMemoryWorldState::with_sample_model();
        run(&world, 1).await.unwrap();

        let err = run(&world, 1).await.unwrap_err();
        match err {
            TransactionError::Registry(RegistryError::DuplicateIdentity(key)) => {
                assert_eq!(
                    key,
                    ResourceKey::new(CustomsParticipant::TYPE, ResourceId::new("CUST_01").unwrap())
                );
            }
            other => panic!("Expected DuplicateIdentity, got {other:?}"),
        }
        assert_eq!(world.index().len().unwrap(), 7);
    }

    #[tokio::test]
    async fn missing_registry_stops_before_later_groups() {
        // No shipper registry: everything up to the importer is written, nothing after.
        let world = InMemoryWorldState::new()
            .with_registry::<CustomsParticipant>()
            .with_registry::<LogisticsParticipant>()
            .with_registry::<ImporterParticipant>()
            .with_registry::<Invoice>()
            .with_registry::<Shipment>();

        let err = run(&world, 2).await.unwrap_err();
        assert!(matches!(
            err,
            TransactionError::Registry(RegistryError::RegistryNotFound(t)) if t == ShipperParticipant::TYPE
        ));

        let invoices = world.asset_registry::<Invoice>().await.unwrap();
        assert!(invoices.get_all().await.unwrap().is_empty());
        assert_eq!(world.index().len().unwrap(), 4);
    }

    #[tokio::test]
    async fn zero_invoices_is_a_domain_error() {
        let world = InMemoryWorldState::with_sample_model();
        let err = run(&world, 0).await.unwrap_err();
        assert!(matches!(err, TransactionError::Domain(DomainError::Validation(_))));
        assert!(world.index().is_empty().unwrap());
    }

    #[tokio::test]
    async fn seeding_needs_no_event_bus() {
        let world = InMemoryWorldState::with_sample_model();
        let factory = Factory::new();
        let ctx = TransactionContext::new(&world, &(), &factory, TransactionId::new());

        let summary = setup_demo(&ctx, &SetupDemo::default()).await.unwrap();
        assert_eq!(summary.shipments, 1);
    }

    #[tokio::test]
    async fn oversized_count_is_a_domain_error_before_any_write() {
        let world = InMemoryWorldState::with_sample_model();
        let err = run(&world, usize::MAX).await.unwrap_err();
        assert!(matches!(err, TransactionError::Domain(DomainError::Validation(_))));
        assert!(world.index().is_empty().unwrap());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn n_invoices_seed_n_shipments(n in 1usize..25) {
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            rt.block_on(async {
                let world = InMemoryWorldState::with_sample_model();
                let summary = run(&world, n).await.unwrap();
                assert_eq!(summary.invoices, n);
                assert_eq!(summary.shipments, n);

                let shipments = world.asset_registry::<Shipment>().await.unwrap().get_all().await.unwrap();
                let invoices = world.asset_registry::<Invoice>().await.unwrap();
                assert_eq!(shipments.len(), n);

                let mut targets = std::collections::HashSet::new();
                for s in &shipments {
                    assert!(invoices.exists(s.invoice().id()).await.unwrap());
                    assert!(targets.insert(s.invoice().id().clone()));
                }
            });
        }
    }
}
