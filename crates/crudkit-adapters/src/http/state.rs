//! Shared server state, injected into the depot.

use std::sync::Arc;

use crudkit_core::{
    application::EntityService,
    domain::{RepositoryKind, ResourceNames},
};

use crate::container::Container;

pub struct AppState {
    pub container: Container,
    pub names: ResourceNames,
    pub project_name: String,
}

impl AppState {
    #[must_use]
    pub fn new(kind: RepositoryKind, names: ResourceNames, project_name: impl Into<String>) -> Self {
        Self {
            container: Container::new(kind),
            names,
            project_name: project_name.into(),
        }
    }

    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn entities(&self) -> EntityService {
        self.container.entity_service()
    }
}
