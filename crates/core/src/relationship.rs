//! Weak references between resources.
//!
//! A relationship names its target by type + identity only. Resolving it is
//! the registry's job; holding one never implies ownership.

use core::marker::PhantomData;
use core::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{DomainError, DomainResult};
use crate::id::{ResourceId, TypeName};
use crate::resource::Resource;

const URI_SCHEME: &str = "resource:";

/// Untyped `(type, identity)` pair. Used wherever records of different types
/// are handled together (identity indexes, error messages).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    pub type_name: TypeName,
    pub id: ResourceId,
}

impl ResourceKey {
    pub fn new(type_name: TypeName, id: ResourceId) -> Self {
        Self { type_name, id }
    }
}

impl core::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.type_name, self.id)
    }
}

/// Typed reference to a resource of type `R`.
///
/// Serialises as `resource:org.acme.sample.Invoice#INV_001`.
pub struct Relationship<R> {
    id: ResourceId,
    _target: PhantomData<fn() -> R>,
}

impl<R: Resource> Relationship<R> {
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            _target: PhantomData,
        }
    }

    /// Reference an existing record.
    pub fn to(record: &R) -> Self {
        Self::new(record.id().clone())
    }

    pub fn id(&self) -> &ResourceId {
        &self.id
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(R::TYPE, self.id.clone())
    }

    pub fn to_uri(&self) -> String {
        format!("{URI_SCHEME}{}#{}", R::TYPE, self.id)
    }
}

impl<R> Clone for Relationship<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            _target: PhantomData,
        }
    }
}

impl<R> PartialEq for Relationship<R> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<R> Eq for Relationship<R> {}

impl<R> core::hash::Hash for Relationship<R> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<R: Resource> core::fmt::Debug for Relationship<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Relationship").field(&self.to_uri()).finish()
    }
}

impl<R: Resource> core::fmt::Display for Relationship<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.to_uri())
    }
}

impl<R: Resource> FromStr for Relationship<R> {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let rest = s
            .strip_prefix(URI_SCHEME)
            .ok_or_else(|| DomainError::invalid_id(format!("'{s}' is not a resource URI")))?;
        let (fqn, id) = rest
            .split_once('#')
            .ok_or_else(|| DomainError::invalid_id(format!("'{s}' has no identity part")))?;
        if !R::TYPE.matches(fqn) {
            return Err(DomainError::invariant(format!(
                "relationship points at {fqn}, expected {}",
                R::TYPE
            )));
        }
        Ok(Self::new(ResourceId::new(id)?))
    }
}

impl<R: Resource> Serialize for Relationship<R> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_uri())
    }
}

impl<'de, R: Resource> Deserialize<'de> for Relationship<R> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
