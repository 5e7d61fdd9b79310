//! Local demo node: seeds the customs network, then runs one sample
//! transaction and one customs review, logging every emitted event.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use customsnet_assets::{CustomsStatus, NetworkEvent, SampleAsset};
use customsnet_core::ResourceId;
use customsnet_events::{EventBus, EventEnvelope, InMemoryEventBus, Subscription};
use customsnet_runtime::{
    InMemoryWorldState, RegistryProvider, RuntimeConfig, TransactionProcessor, TransactionRequest,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RuntimeConfig::from_env().context("reading configuration")?;
    customsnet_observability::init_with(&config.log_filter, config.log_json);

    let world = InMemoryWorldState::with_sample_model();
    info!(types = world.deployed_types().len(), "business network deployed");

    let bus: Arc<InMemoryEventBus<EventEnvelope<NetworkEvent>>> = Arc::new(InMemoryEventBus::new());
    let subscription = bus.subscribe();
    let processor = TransactionProcessor::new(world, bus);

    let setup = processor
        .submit(TransactionRequest::SetupDemo(config.setup_demo()))
        .await
        .context("seeding the demo network")?;
    if let Some(seeded) = setup.seeded {
        info!(
            participants = seeded.participants,
            invoices = seeded.invoices,
            shipments = seeded.shipments,
            "demo ready"
        );
    }

    let asset_id = ResourceId::new("ASSET_001")?;
    processor
        .provider()
        .asset_registry::<SampleAsset>()
        .await?
        .add(SampleAsset::new(asset_id.clone(), "10"))
        .await
        .context("adding the demo sample asset")?;

    processor
        .submit(TransactionRequest::SampleTransaction {
            asset_id,
            new_value: "42".to_string(),
        })
        .await
        .context("running the sample transaction")?;

    processor
        .submit(TransactionRequest::ShipmentCustomsReview {
            shipment_id: ResourceId::new("SHIP_001")?,
            review_status: CustomsStatus::Cleared,
        })
        .await
        .context("reviewing SHIP_001")?;

    log_events(&subscription)?;

    for record in processor.history() {
        info!(
            transaction_id = %record.transaction_id,
            transaction_type = %record.transaction_type,
            events = record.event_count,
            "historian"
        );
    }

    Ok(())
}

fn log_events(subscription: &Subscription<EventEnvelope<NetworkEvent>>) -> anyhow::Result<()> {
    for envelope in subscription.drain() {
        let json = envelope.to_json()?;
        info!(
            event_id = %json.event_id(),
            transaction_id = %json.transaction_id(),
            event_type = json.event_type(),
            payload = %json.payload(),
            "event received"
        );
    }
    Ok(())
}
