use tracing::debug;

use customsnet_assets::{NetworkEvent, SampleAsset, SampleEvent};
use customsnet_core::{Relationship, Resource};
use customsnet_events::{EventBus, EventEnvelope};

use crate::context::TransactionContext;
use crate::processor::TransactionError;
use crate::registry::RegistryProvider;
use crate::transaction::SampleTransaction;

/// Set `tx.asset`'s value to `tx.new_value` and emit a `SampleEvent`.
///
/// `tx.asset` is updated in place before persisting, so on failure the caller
/// still holds the attempted state; the registry does not.
pub async fn sample_transaction<P, B>(
    ctx: &TransactionContext<'_, P, B>,
    tx: &mut SampleTransaction,
) -> Result<EventEnvelope<NetworkEvent>, TransactionError>
where
    P: RegistryProvider,
    B: EventBus<EventEnvelope<NetworkEvent>>,
{
    let old_value = tx.asset.replace_value(tx.new_value.clone());

    let registry = ctx.asset_registry::<SampleAsset>().await?;
    registry.update(tx.asset.clone()).await?;
    debug!(asset = %tx.asset.key(), "sample asset updated");

    Ok(ctx.emit(SampleEvent {
        asset: Relationship::to(&tx.asset),
        old_value,
        new_value: tx.new_value.clone(),
        occurred_at: ctx.now(),
    }))
}
