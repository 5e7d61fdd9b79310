//! `customsnet-core` — identity and record building blocks shared by the
//! business-network model.
//!
//! This crate contains **pure domain** primitives (no registries, no IO).

pub mod error;
pub mod id;
pub mod relationship;
pub mod resource;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::{EventId, ResourceId, TransactionId, TypeName};
pub use relationship::{Relationship, ResourceKey};
pub use resource::{Resource, ResourceKind};
pub use value_object::ValueObject;

/// Namespace every type of the sample customs network lives in.
pub const MODEL_NAMESPACE: &str = "org.acme.sample";
