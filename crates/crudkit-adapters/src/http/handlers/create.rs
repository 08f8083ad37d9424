//! Create Record Handler

use std::sync::Arc;

use salvo::prelude::*;

use crudkit_core::error::CrudkitError;

use crate::http::{
    errors::ApiError,
    extensions::DepotExt,
    schemas::{CreateEntityRequest, EntityResponse},
    state::AppState,
};

/// Responds 201 with the stored record; the id is a fresh UUID v4.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<EntityResponse>, ApiError> {
    let request = req
        .parse_json::<CreateEntityRequest>()
        .await
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?;

    let state = depot.obtain_or_500::<Arc<AppState>>()?;
    let service_error = |e: CrudkitError| ApiError::from_service(e, &state.names);

    let entity = request
        .into_entity()
        .map_err(|e| service_error(CrudkitError::Domain(e)))?;
    let stored = state.entities().create_entity(entity).map_err(service_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(stored.into()))
}
