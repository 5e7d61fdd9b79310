//! Resource trait: a typed record with identity, stored in a registry.

use crate::id::{ResourceId, TypeName};
use crate::relationship::ResourceKey;

/// Which family of registry a resource type lives in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Asset,
    Participant,
}

impl core::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ResourceKind::Asset => f.write_str("asset"),
            ResourceKind::Participant => f.write_str("participant"),
        }
    }
}

/// A record with identity, owned by exactly one registry.
///
/// Each model type declares its fully-qualified `TYPE` (the registry key) and
/// its `KIND`. Outgoing references are reported through `references()` so a
/// registry can refuse to store a record whose targets do not exist yet.
pub trait Resource: Clone + core::fmt::Debug + Send + Sync + 'static {
    const TYPE: TypeName;
    const KIND: ResourceKind;

    fn id(&self) -> &ResourceId;

    fn key(&self) -> ResourceKey {
        ResourceKey::new(Self::TYPE, self.id().clone())
    }

    /// Identities this record points at (weak references).
    fn references(&self) -> Vec<ResourceKey> {
        Vec::new()
    }
}
