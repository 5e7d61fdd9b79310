//! Registry boundary: CRUD access to one collection of assets or participants.
//!
//! The host platform owns real storage. This module defines the contract the
//! handlers consume and an in-memory implementation that enforces the same
//! integrity rules (unique identities, resolvable references).

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{IdentityIndex, InMemoryRegistry};
pub use r#trait::{Registry, RegistryError, RegistryProvider};
