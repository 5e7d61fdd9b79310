use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tracing::debug;

use customsnet_core::{Resource, ResourceId, ResourceKey};

use super::r#trait::{Registry, RegistryError};

fn poisoned(what: &str) -> RegistryError {
    RegistryError::Unavailable(format!("{what} lock poisoned"))
}

/// Every identity stored in any registry of one world state.
///
/// Registries share one index so a record can be checked against references
/// into other registries before it is written.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    keys: RwLock<HashSet<ResourceKey>>,
}

impl IdentityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ResourceKey) -> Result<bool, RegistryError> {
        let keys = self.keys.read().map_err(|_| poisoned("identity index"))?;
        Ok(keys.contains(key))
    }

    pub fn len(&self) -> Result<usize, RegistryError> {
        let keys = self.keys.read().map_err(|_| poisoned("identity index"))?;
        Ok(keys.len())
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    fn insert_all(&self, new_keys: impl IntoIterator<Item = ResourceKey>) -> Result<(), RegistryError> {
        let mut keys = self.keys.write().map_err(|_| poisoned("identity index"))?;
        keys.extend(new_keys);
        Ok(())
    }

    /// First reference of `records` that is neither indexed nor part of the
    /// batch itself.
    fn first_unresolved<R: Resource>(
        &self,
        records: &[R],
    ) -> Result<Option<(ResourceKey, ResourceKey)>, RegistryError> {
        let keys = self.keys.read().map_err(|_| poisoned("identity index"))?;
        let batch: HashSet<ResourceKey> = records.iter().map(Resource::key).collect();

        for record in records {
            for target in record.references() {
                if !keys.contains(&target) && !batch.contains(&target) {
                    return Ok(Some((record.key(), target)));
                }
            }
        }
        Ok(None)
    }
}

/// In-memory registry for one record type.
///
/// Intended for tests and the demo node. Not optimized for performance.
#[derive(Debug)]
pub struct InMemoryRegistry<R> {
    records: RwLock<BTreeMap<ResourceId, R>>,
    index: Arc<IdentityIndex>,
}

impl<R: Resource> InMemoryRegistry<R> {
    pub fn new(index: Arc<IdentityIndex>) -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            index,
        }
    }

    /// Stand-alone registry with its own identity index.
    pub fn detached() -> Self {
        Self::new(Arc::new(IdentityIndex::new()))
    }

    pub fn len(&self) -> Result<usize, RegistryError> {
        let records = self.records.read().map_err(|_| poisoned("registry"))?;
        Ok(records.len())
    }

    pub fn is_empty(&self) -> Result<bool, RegistryError> {
        Ok(self.len()? == 0)
    }

    fn ensure_resolved(&self, records: &[R]) -> Result<(), RegistryError> {
        match self.index.first_unresolved(records)? {
            Some((from, to)) => Err(RegistryError::UnresolvedReference { from, to }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl<R: Resource> Registry<R> for InMemoryRegistry<R> {
    async fn get(&self, id: &ResourceId) -> Result<R, RegistryError> {
        let records = self.records.read().map_err(|_| poisoned("registry"))?;
        records
            .get(id)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(ResourceKey::new(R::TYPE, id.clone())))
    }

    async fn exists(&self, id: &ResourceId) -> Result<bool, RegistryError> {
        let records = self.records.read().map_err(|_| poisoned("registry"))?;
        Ok(records.contains_key(id))
    }

    async fn get_all(&self) -> Result<Vec<R>, RegistryError> {
        let records = self.records.read().map_err(|_| poisoned("registry"))?;
        Ok(records.values().cloned().collect())
    }

    async fn add_all(&self, batch: Vec<R>) -> Result<(), RegistryError> {
        let mut records = self.records.write().map_err(|_| poisoned("registry"))?;

        let mut seen = HashSet::with_capacity(batch.len());
        for record in &batch {
            if records.contains_key(record.id()) || !seen.insert(record.id().clone()) {
                return Err(RegistryError::DuplicateIdentity(record.key()));
            }
        }
        self.ensure_resolved(&batch)?;

        // Validation passed; nothing below can reject part of the batch.
        self.index.insert_all(batch.iter().map(Resource::key))?;
        let count = batch.len();
        for record in batch {
            records.insert(record.id().clone(), record);
        }

        debug!(registry = %R::TYPE, count, "records added");
        Ok(())
    }

    async fn update_all(&self, batch: Vec<R>) -> Result<(), RegistryError> {
        let mut records = self.records.write().map_err(|_| poisoned("registry"))?;

        if let Some(unknown) = batch.iter().find(|r| !records.contains_key(r.id())) {
            return Err(RegistryError::NotFound(unknown.key()));
        }
        self.ensure_resolved(&batch)?;

        let count = batch.len();
        for record in batch {
            records.insert(record.id().clone(), record);
        }

        debug!(registry = %R::TYPE, count, "records updated");
        Ok(())
    }
}
