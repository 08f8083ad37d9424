//! Service banner

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::{Value, json};

use crate::http::{errors::ApiError, extensions::DepotExt, state::AppState};

#[handler]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Value>, ApiError> {
    let state = depot.obtain_or_500::<Arc<AppState>>()?;
    Ok(Json(json!({ "message": format!("{} API", state.project_name) })))
}
