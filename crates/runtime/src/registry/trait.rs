use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use customsnet_core::{Resource, ResourceId, ResourceKey, ResourceKind, TypeName};

/// Registry operation error.
///
/// These are the only failures a handler can see from its collaborators. They
/// are propagated to the submitter unchanged.
///
/// - **RegistryNotFound**: no registry is registered under the type name
/// - **KindMismatch**: an asset registry was requested for a participant type
///   (or vice versa)
/// - **NotFound**: the record does not exist (e.g. `update` of an unknown id)
/// - **DuplicateIdentity**: an insert collides with an existing identity
/// - **UnresolvedReference**: a relationship points at a record that is not
///   stored anywhere
/// - **Unavailable**: the backing store cannot serve the request
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no registry for type {0}")]
    RegistryNotFound(TypeName),

    #[error("{type_name} is a {actual} type, not a {expected} type")]
    KindMismatch {
        type_name: TypeName,
        expected: ResourceKind,
        actual: ResourceKind,
    },

    #[error("record not found: {0}")]
    NotFound(ResourceKey),

    #[error("duplicate identity: {0}")]
    DuplicateIdentity(ResourceKey),

    #[error("unresolved reference from {from} to {to}")]
    UnresolvedReference { from: ResourceKey, to: ResourceKey },

    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

impl RegistryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RegistryError::NotFound(_) | RegistryError::RegistryNotFound(_))
    }
}

/// Collection of records of one type, keyed by identity.
///
/// ## Write semantics
///
/// - `add_all` inserts a batch atomically: the whole batch is rejected if any
///   identity already exists (or repeats inside the batch), or if any record
///   references something that is not stored yet.
/// - `update_all` replaces existing records atomically: the whole batch is
///   rejected if any identity is unknown.
///
/// There is no delete: records created through a registry live as long as
/// the world state.
#[async_trait]
pub trait Registry<R: Resource>: Send + Sync {
    fn type_name(&self) -> TypeName {
        R::TYPE
    }

    async fn get(&self, id: &ResourceId) -> Result<R, RegistryError>;

    async fn exists(&self, id: &ResourceId) -> Result<bool, RegistryError>;

    /// All records, ordered by identity.
    async fn get_all(&self) -> Result<Vec<R>, RegistryError>;

    async fn add(&self, record: R) -> Result<(), RegistryError> {
        self.add_all(vec![record]).await
    }

    async fn add_all(&self, records: Vec<R>) -> Result<(), RegistryError>;

    async fn update(&self, record: R) -> Result<(), RegistryError> {
        self.update_all(vec![record]).await
    }

    async fn update_all(&self, records: Vec<R>) -> Result<(), RegistryError>;
}

/// Hands out registries by fully-qualified type name.
///
/// Obtaining a registry is itself asynchronous and fallible: the host may
/// have to open it, and the type may not be deployed at all.
#[async_trait]
pub trait RegistryProvider: Send + Sync {
    async fn registry<R: Resource>(&self) -> Result<Arc<dyn Registry<R>>, RegistryError>;

    async fn asset_registry<R: Resource>(&self) -> Result<Arc<dyn Registry<R>>, RegistryError> {
        ensure_kind::<R>(ResourceKind::Asset)?;
        self.registry::<R>().await
    }

    async fn participant_registry<R: Resource>(
        &self,
    ) -> Result<Arc<dyn Registry<R>>, RegistryError> {
        ensure_kind::<R>(ResourceKind::Participant)?;
        self.registry::<R>().await
    }
}

#[async_trait]
impl<P> RegistryProvider for Arc<P>
where
    P: RegistryProvider,
{
    async fn registry<R: Resource>(&self) -> Result<Arc<dyn Registry<R>>, RegistryError> {
        (**self).registry::<R>().await
    }
}

fn ensure_kind<R: Resource>(expected: ResourceKind) -> Result<(), RegistryError> {
    if R::KIND != expected {
        return Err(RegistryError::KindMismatch {
            type_name: R::TYPE,
            expected,
            actual: R::KIND,
        });
    }
    Ok(())
}
