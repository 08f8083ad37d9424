//! Test helpers.

use salvo::prelude::*;

use crudkit_core::domain::{Entity, RepositoryKind, ResourceNames};

use crate::http::{AppState, app_router};

pub(crate) const BASE: &str = "http://example.com/api/v1/entities";

pub(crate) fn service() -> Service {
    seeded_service(&[])
}

/// Service over a fresh store holding `Item <id>` records at price 1.0.
pub(crate) fn seeded_service(ids: &[&str]) -> Service {
    let state = AppState::new(RepositoryKind::Memory, ResourceNames::entity(), "shop").shared();

    let entities = state.entities();
    for id in ids {
        let entity = Entity::new(*id, format!("Item {id}"), 1.0).expect("valid fixture");
        entities.create_entity(entity).expect("seed");
    }

    Service::new(app_router(state, "/api/v1"))
}
