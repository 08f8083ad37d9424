//! Lazy wiring of the record repository and the service layer.

use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crudkit_core::{
    application::{EntityService, ports::EntityRepository},
    domain::RepositoryKind,
};

use crate::repository::MemoryRepository;

/// Holds one repository and one [`EntityService`], both built on first use.
///
/// Every call to [`Container::entity_service`] on the same container returns
/// a service backed by the same repository.
#[derive(Default)]
pub struct Container {
    kind: RepositoryKind,
    repository: OnceCell<Arc<dyn EntityRepository>>,
    entity_service: OnceCell<EntityService>,
}

impl Container {
    pub fn new(kind: RepositoryKind) -> Self {
        Self {
            kind,
            repository: OnceCell::new(),
            entity_service: OnceCell::new(),
        }
    }

    pub fn kind(&self) -> RepositoryKind {
        self.kind
    }

    pub fn repository(&self) -> Arc<dyn EntityRepository> {
        self.repository
            .get_or_init(|| {
                debug!(kind = %self.kind, "Creating repository");
                match self.kind {
                    RepositoryKind::Memory => Arc::new(MemoryRepository::new()),
                }
            })
            .clone()
    }

    pub fn entity_service(&self) -> EntityService {
        self.entity_service
            .get_or_init(|| EntityService::new(self.repository()))
            .clone()
    }

    /// Drop both lazies; the next access builds a fresh, empty store.
    pub fn reset(&mut self) {
        debug!("Resetting container");
        self.entity_service = OnceCell::new();
        self.repository = OnceCell::new();
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("kind", &self.kind)
            .field("repository_ready", &self.repository.get().is_some())
            .field("service_ready", &self.entity_service.get().is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crudkit_core::domain::{Entity, Page};

    #[test]
    fn services_share_one_repository() {
        let container = Container::new(RepositoryKind::Memory);
        container
            .entity_service()
            .create_entity(Entity::new("a", "Apple", 1.0).unwrap())
            .unwrap();

        assert_eq!(container.entity_service().count_entities().unwrap(), 1);
        assert!(Arc::ptr_eq(&container.repository(), &container.repository()));
    }

    #[test]
    fn reset_yields_an_empty_store() {
        let mut container = Container::default();
        container
            .entity_service()
            .create_entity(Entity::new("a", "Apple", 1.0).unwrap())
            .unwrap();

        container.reset();
        assert!(container
            .entity_service()
            .list_entities(Page::all())
            .unwrap()
            .is_empty());
    }
}
