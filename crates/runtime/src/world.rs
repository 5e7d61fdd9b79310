//! In-memory world state: one registry per deployed type, sharing one
//! identity index.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use customsnet_assets::{Invoice, SampleAsset, Shipment};
use customsnet_core::{Resource, TypeName};
use customsnet_participants::{
    CustomsParticipant, ImporterParticipant, LogisticsParticipant, ShipperParticipant,
};

use crate::registry::{IdentityIndex, InMemoryRegistry, Registry, RegistryError, RegistryProvider};

/// Registry provider backed by process memory.
///
/// Registries are declared up front (`with_registry`); asking for an
/// undeclared type fails with `RegistryNotFound`, the same way the host
/// rejects a type that is not part of the deployed model.
#[derive(Debug, Default)]
pub struct InMemoryWorldState {
    index: Arc<IdentityIndex>,
    registries: HashMap<TypeName, Arc<dyn Any + Send + Sync>>,
}

impl InMemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// World state with every type of the sample customs model deployed.
    pub fn with_sample_model() -> Self {
        Self::new()
            .with_registry::<SampleAsset>()
            .with_registry::<CustomsParticipant>()
            .with_registry::<LogisticsParticipant>()
            .with_registry::<ImporterParticipant>()
            .with_registry::<ShipperParticipant>()
            .with_registry::<Invoice>()
            .with_registry::<Shipment>()
    }

    /// Declare a registry for `R`. Declaring the same type twice keeps the
    /// first registry.
    pub fn with_registry<R: Resource>(mut self) -> Self {
        let index = self.index.clone();
        self.registries
            .entry(R::TYPE)
            .or_insert_with(|| Arc::new(InMemoryRegistry::<R>::new(index)));
        self
    }

    pub fn deployed_types(&self) -> Vec<TypeName> {
        let mut types: Vec<TypeName> = self.registries.keys().copied().collect();
        types.sort();
        types
    }

    /// Identity index shared by all registries of this world.
    pub fn index(&self) -> &Arc<IdentityIndex> {
        &self.index
    }

    fn typed<R: Resource>(&self) -> Result<Arc<InMemoryRegistry<R>>, RegistryError> {
        let any = self
            .registries
            .get(&R::TYPE)
            .cloned()
            .ok_or(RegistryError::RegistryNotFound(R::TYPE))?;

        any.downcast::<InMemoryRegistry<R>>().map_err(|_| {
            RegistryError::Unavailable(format!("registry {} holds another record type", R::TYPE))
        })
    }
}

#[async_trait]
impl RegistryProvider for InMemoryWorldState {
    async fn registry<R: Resource>(&self) -> Result<Arc<dyn Registry<R>>, RegistryError> {
        let registry: Arc<dyn Registry<R>> = self.typed::<R>()?;
        Ok(registry)
    }
}
