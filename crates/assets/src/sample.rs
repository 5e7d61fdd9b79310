use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use customsnet_core::{MODEL_NAMESPACE, Relationship, Resource, ResourceId, ResourceKind, TypeName};

/// Asset: the generic sample asset holding a single string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleAsset {
    id: ResourceId,
    value: String,
}

impl SampleAsset {
    pub fn new(id: ResourceId, value: impl Into<String>) -> Self {
        Self {
            id,
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Overwrite the value, handing back the one it replaced.
    pub fn replace_value(&mut self, value: impl Into<String>) -> String {
        core::mem::replace(&mut self.value, value.into())
    }
}

impl Resource for SampleAsset {
    const TYPE: TypeName = TypeName::new(MODEL_NAMESPACE, "SampleAsset");
    const KIND: ResourceKind = ResourceKind::Asset;

    fn id(&self) -> &ResourceId {
        &self.id
    }
}

/// Event: a sample asset's value changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleEvent {
    pub asset: Relationship<SampleAsset>,
    pub old_value: String,
    pub new_value: String,
    pub occurred_at: DateTime<Utc>,
}
