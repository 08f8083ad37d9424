//! Request handlers, one module per route.

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod health;
pub(crate) mod index;
pub(crate) mod root;
pub(crate) mod update;

use salvo::prelude::Request;

use crudkit_core::domain::EntityId;

use crate::http::errors::ApiError;

/// The `{id}` path segment as a record id.
pub(crate) fn path_id(req: &Request) -> Result<EntityId, ApiError> {
    req.param::<String>("id")
        .and_then(|raw| EntityId::new(raw).ok())
        .ok_or_else(|| ApiError::Unprocessable("path parameter 'id' is required".into()))
}
