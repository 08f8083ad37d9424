//! Update Record Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::http::{
    errors::ApiError,
    extensions::DepotExt,
    handlers::path_id,
    schemas::{EntityResponse, UpdateEntityRequest},
    state::AppState,
};

/// Merge the present fields into the stored record.
#[handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<EntityResponse>, ApiError> {
    let id = path_id(req)?;
    let request = req
        .parse_json::<UpdateEntityRequest>()
        .await
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?;

    let state = depot.obtain_or_500::<Arc<AppState>>()?;

    let updated = state
        .entities()
        .patch_entity(&id, request.into())
        .map_err(|e| ApiError::from_service(e, &state.names))?;

    Ok(Json(updated.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::http::test_helpers::{BASE, seeded_service};

    use super::*;

    #[tokio::test]
    async fn test_update_merges_present_fields() -> TestResult {
        let mut res = TestClient::put(format!("{BASE}/a"))
            .json(&json!({ "price": 4.25, "in_stock": false }))
            .send(&seeded_service(&["a"]))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        let body: EntityResponse = res.take_json().await?;
        assert_eq!(
            body,
            EntityResponse {
                id: "a".into(),
                name: "Item a".into(),
                price: 4.25,
                in_stock: false,
            }
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_update_missing_returns_404() -> TestResult {
        let res = TestClient::put(format!("{BASE}/ghost"))
            .json(&json!({ "price": 1.0 }))
            .send(&seeded_service(&["a"]))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_negative_price_returns_400() -> TestResult {
        let res = TestClient::put(format!("{BASE}/a"))
            .json(&json!({ "price": -3.0 }))
            .send(&seeded_service(&["a"]))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
