//! Get Record Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::http::{
    errors::ApiError, extensions::DepotExt, handlers::path_id, schemas::EntityResponse,
    state::AppState,
};

#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<EntityResponse>, ApiError> {
    let state = depot.obtain_or_500::<Arc<AppState>>()?;
    let id = path_id(req)?;

    let entity = state
        .entities()
        .get_entity(&id)
        .map_err(|e| ApiError::from_service(e, &state.names))?;

    Ok(Json(entity.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crate::http::test_helpers::{BASE, seeded_service};

    use super::*;

    #[tokio::test]
    async fn test_get_returns_200() -> TestResult {
        let mut res = TestClient::get(format!("{BASE}/b"))
            .send(&seeded_service(&["a", "b"]))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        let body: EntityResponse = res.take_json().await?;
        assert_eq!(body.id, "b");
        assert_eq!(body.name, "Item b");

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_returns_404() -> TestResult {
        let mut res = TestClient::get(format!("{BASE}/ghost"))
            .send(&seeded_service(&["a"]))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        let body: Value = res.take_json().await?;
        assert_eq!(
            body,
            json!({ "error": "Entity 'ghost' not found", "entity_id": "ghost" })
        );

        Ok(())
    }
}
