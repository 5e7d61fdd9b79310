use tracing::debug;

use customsnet_assets::{CustomsEvent, NetworkEvent, Shipment};
use customsnet_core::{Relationship, Resource};
use customsnet_events::{EventBus, EventEnvelope};

use crate::context::TransactionContext;
use crate::processor::TransactionError;
use crate::registry::RegistryProvider;
use crate::transaction::ShipmentCustomsReview;

/// Record a customs decision on a shipment and emit a `CustomsEvent`.
///
/// Any status may follow any other; reviewing to the current status still
/// persists and still emits.
pub async fn review_import_goods<P, B>(
    ctx: &TransactionContext<'_, P, B>,
    review: &mut ShipmentCustomsReview,
) -> Result<EventEnvelope<NetworkEvent>, TransactionError>
where
    P: RegistryProvider,
    B: EventBus<EventEnvelope<NetworkEvent>>,
{
    let old_status = review.shipment.replace_customs_status(review.review_status);

    let registry = ctx.asset_registry::<Shipment>().await?;
    registry.update(review.shipment.clone()).await?;
    debug!(
        shipment = %review.shipment.key(),
        from = %old_status,
        to = %review.review_status,
        "customs status updated"
    );

    Ok(ctx.emit(CustomsEvent {
        shipment: Relationship::to(&review.shipment),
        old_customs_status: old_status,
        new_customs_status: review.review_status,
        occurred_at: ctx.now(),
    }))
}
