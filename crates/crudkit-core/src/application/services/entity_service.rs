//! Entity Service - the CRUD use cases for the example record.
//!
//! Thin orchestration over an [`EntityRepository`]: the record validates
//! itself, the repository owns storage, and this service logs and wires
//! the two together.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::EntityRepository,
    domain::{Entity, EntityId, EntityPatch, Page},
    error::{CrudkitError, CrudkitResult},
};

/// CRUD service for [`Entity`] records.
#[derive(Clone)]
pub struct EntityService {
    repository: Arc<dyn EntityRepository>,
}

impl EntityService {
    pub fn new(repository: Arc<dyn EntityRepository>) -> Self {
        Self { repository }
    }

    /// Store a new record and return it.
    #[instrument(skip_all, fields(id = %entity.id()))]
    pub fn create_entity(&self, entity: Entity) -> CrudkitResult<Entity> {
        entity.validate().map_err(CrudkitError::Domain)?;
        let stored = self.repository.save(entity)?;
        info!(name = %stored.name(), "Entity created");
        Ok(stored)
    }

    #[instrument(skip_all, fields(id = %id))]
    pub fn get_entity(&self, id: &EntityId) -> CrudkitResult<Entity> {
        self.repository.get(id)
    }

    /// Records in insertion order, sliced by `page`.
    #[instrument(skip(self))]
    pub fn list_entities(&self, page: Page) -> CrudkitResult<Vec<Entity>> {
        let entities = self.repository.list(page)?;
        debug!(returned = entities.len(), "Listed entities");
        Ok(entities)
    }

    /// Total record count, ignoring pagination.
    pub fn count_entities(&self) -> CrudkitResult<usize> {
        self.repository.count()
    }

    /// Replace the record with the same id.
    #[instrument(skip_all, fields(id = %entity.id()))]
    pub fn update_entity(&self, entity: Entity) -> CrudkitResult<Entity> {
        entity.validate().map_err(CrudkitError::Domain)?;
        let updated = self.repository.update(entity)?;
        info!("Entity updated");
        Ok(updated)
    }

    /// Read, merge the present fields, validate and replace.
    #[instrument(skip_all, fields(id = %id))]
    pub fn patch_entity(&self, id: &EntityId, patch: EntityPatch) -> CrudkitResult<Entity> {
        let current = self.repository.get(id)?;
        let merged = current.with_changes(patch)?;
        self.update_entity(merged)
    }

    #[instrument(skip_all, fields(id = %id))]
    pub fn delete_entity(&self, id: &EntityId) -> CrudkitResult<()> {
        self.repository.delete(id)?;
        info!("Entity deleted");
        Ok(())
    }
}
