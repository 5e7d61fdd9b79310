use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use customsnet_core::{
    DomainError, MODEL_NAMESPACE, Relationship, Resource, ResourceId, ResourceKey, ResourceKind,
    TypeName,
};

use crate::invoice::Invoice;

/// Customs clearance status of a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CustomsStatus {
    Uncleared,
    Cleared,
    Held,
}

impl CustomsStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomsStatus::Uncleared => "UNCLEARED",
            CustomsStatus::Cleared => "CLEARED",
            CustomsStatus::Held => "HELD",
        }
    }
}

impl core::fmt::Display for CustomsStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomsStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "UNCLEARED" => Ok(CustomsStatus::Uncleared),
            "CLEARED" => Ok(CustomsStatus::Cleared),
            "HELD" => Ok(CustomsStatus::Held),
            other => Err(DomainError::validation(format!(
                "unknown customs status '{other}'"
            ))),
        }
    }
}

/// Asset: a shipment of the goods listed on one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    id: ResourceId,
    customs_status: CustomsStatus,
    invoice: Relationship<Invoice>,
}

impl Shipment {
    /// A new shipment always starts uncleared.
    pub fn new(id: ResourceId, invoice: Relationship<Invoice>) -> Self {
        Self {
            id,
            customs_status: CustomsStatus::Uncleared,
            invoice,
        }
    }

    pub fn customs_status(&self) -> CustomsStatus {
        self.customs_status
    }

    pub fn invoice(&self) -> &Relationship<Invoice> {
        &self.invoice
    }

    /// Overwrite the customs status, handing back the one it replaced.
    pub fn replace_customs_status(&mut self, status: CustomsStatus) -> CustomsStatus {
        core::mem::replace(&mut self.customs_status, status)
    }
}

impl Resource for Shipment {
    const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "Shipment");
    const KIND: ResourceKind = ResourceKind::Asset;

    fn id(&self) -> &ResourceId {
        &self.id
    }

    fn references(&self) -> Vec<ResourceKey> {
        vec![self.invoice.key()]
    }
}

/// Event: customs reviewed a shipment and changed its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomsEvent {
    pub shipment: Relationship<Shipment>,
    pub old_customs_status: CustomsStatus,
    pub new_customs_status: CustomsStatus,
    pub occurred_at: DateTime<Utc>,
}
