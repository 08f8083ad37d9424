//! In-memory record store.

use std::sync::{Arc, RwLock};

use indexmap::IndexMap;
use tracing::trace;

use crudkit_core::{
    application::{ApplicationError, ports::EntityRepository},
    domain::{DomainError, Entity, EntityId, Page},
    error::CrudkitResult,
};

/// Thread-safe, insertion-ordered record store.
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<RwLock<IndexMap<String, Entity>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with records, in order.
    pub fn with_entities(entities: impl IntoIterator<Item = Entity>) -> Self {
        let map = entities
            .into_iter()
            .map(|e| (e.id().as_str().to_string(), e))
            .collect();
        Self {
            inner: Arc::new(RwLock::new(map)),
        }
    }

    fn not_found(id: &EntityId) -> DomainError {
        DomainError::EntityNotFound {
            id: id.as_str().to_string(),
        }
    }
}

impl EntityRepository for MemoryRepository {
    fn save(&self, entity: Entity) -> CrudkitResult<Entity> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        trace!(id = %entity.id(), "save");
        inner.insert(entity.id().as_str().to_string(), entity.clone());
        Ok(entity)
    }

    fn get(&self, id: &EntityId) -> CrudkitResult<Entity> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| Self::not_found(id).into())
    }

    fn list(&self, page: Page) -> CrudkitResult<Vec<Entity>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        Ok(page.apply(inner.values().cloned()))
    }

    fn update(&self, entity: Entity) -> CrudkitResult<Entity> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        match inner.get_mut(entity.id().as_str()) {
            Some(slot) => {
                *slot = entity.clone();
                Ok(entity)
            }
            None => Err(Self::not_found(entity.id()).into()),
        }
    }

    fn delete(&self, id: &EntityId) -> CrudkitResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner
            .shift_remove(id.as_str())
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id).into())
    }

    fn count(&self) -> CrudkitResult<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;
        Ok(inner.len())
    }

    fn clear(&self) -> CrudkitResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.clear();
        Ok(())
    }
}
