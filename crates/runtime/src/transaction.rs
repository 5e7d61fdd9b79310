//! Transaction records of the customs network.

use customsnet_assets::{CustomsStatus, SampleAsset, Shipment};
use customsnet_core::{MODEL_NAMESPACE, ResourceId, TypeName};

/// Set a sample asset's value. The asset arrives already loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleTransaction {
    pub asset: SampleAsset,
    pub new_value: String,
}

impl SampleTransaction {
    pub const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "SampleTransaction");
}

/// Customs review of an import shipment. The shipment arrives already loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentCustomsReview {
    pub shipment: Shipment,
    pub review_status: CustomsStatus,
}

impl ShipmentCustomsReview {
    pub const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "ShipmentCustomsReview");
}

/// Seed the network with demo participants, invoices and shipments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupDemo {
    /// Number of invoices to seed; one shipment is seeded per invoice.
    pub invoice_count: usize,
}

impl SetupDemo {
    pub const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "SetupDemo");
}

impl Default for SetupDemo {
    fn default() -> Self {
        Self { invoice_count: 1 }
    }
}

/// A submitted transaction whose asset references are not resolved yet.
///
/// The processor loads the referenced records before invoking the handler,
/// the way the host resolves relationships of a submitted transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionRequest {
    SampleTransaction {
        asset_id: ResourceId,
        new_value: String,
    },
    ShipmentCustomsReview {
        shipment_id: ResourceId,
        review_status: CustomsStatus,
    },
    SetupDemo(SetupDemo),
}

impl TransactionRequest {
    pub fn transaction_type(&self) -> TypeName {
        match self {
            TransactionRequest::SampleTransaction { .. } => SampleTransaction::TYPE,
            TransactionRequest::ShipmentCustomsReview { .. } => ShipmentCustomsReview::TYPE,
            TransactionRequest::SetupDemo(_) => SetupDemo::TYPE,
        }
    }
}
