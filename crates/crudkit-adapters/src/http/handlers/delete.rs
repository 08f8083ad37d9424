//! Delete Record Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::http::{errors::ApiError, extensions::DepotExt, handlers::path_id, state::AppState};

#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<StatusCode, ApiError> {
    let state = depot.obtain_or_500::<Arc<AppState>>()?;
    let id = path_id(req)?;

    state
        .entities()
        .delete_entity(&id)
        .map_err(|e| ApiError::from_service(e, &state.names))?;

    Ok(StatusCode::NO_CONTENT)
}
