//! List Records Handler

use std::sync::Arc;

use salvo::prelude::*;
use serde_json::{Map, Value};

use crudkit_core::domain::Page;

use crate::http::{errors::ApiError, extensions::DepotExt, schemas::EntityResponse, state::AppState};

/// Optional non-negative integer query parameter with a lower bound.
fn bounded(req: &Request, key: &str, min: usize) -> Result<Option<usize>, ApiError> {
    let Some(raw) = req.query::<String>(key) else {
        return Ok(None);
    };

    match raw.trim().parse::<usize>() {
        Ok(value) if value >= min => Ok(Some(value)),
        _ => Err(ApiError::Unprocessable(format!(
            "query parameter '{key}' must be an integer >= {min}"
        ))),
    }
}

/// `{"<plural>": [...], "count": total}`; `count` ignores pagination.
#[handler]
pub(crate) async fn handler(req: &mut Request, depot: &mut Depot) -> Result<Json<Value>, ApiError> {
    let state = depot.obtain_or_500::<Arc<AppState>>()?;
    let page = Page::new(bounded(req, "offset", 0)?.unwrap_or(0), bounded(req, "limit", 1)?);

    let service = state.entities();
    let service_error = |e| ApiError::from_service(e, &state.names);

    let entities = service.list_entities(page).map_err(service_error)?;
    let count = service.count_entities().map_err(service_error)?;

    let items = entities
        .into_iter()
        .map(EntityResponse::from)
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    let mut body = Map::new();
    body.insert(state.names.plural().to_string(), Value::Array(items));
    body.insert("count".into(), Value::from(count));

    Ok(Json(Value::Object(body)))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::http::test_helpers::{BASE, seeded_service};

    use super::*;

    async fn ids(url: &str) -> Result<(Vec<String>, u64), Box<dyn std::error::Error>> {
        let body: Value = TestClient::get(url)
            .send(&seeded_service(&["a", "b", "c", "d"]))
            .await
            .take_json()
            .await?;

        let ids = body["entities"]
            .as_array()
            .map(|items| {
                items
                    .iter()
                    .filter_map(|i| i["id"].as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();
        Ok((ids, body["count"].as_u64().unwrap_or_default()))
    }

    #[tokio::test]
    async fn test_index_returns_all_in_insertion_order() -> TestResult {
        let (ids, count) = ids(BASE).await?;

        assert_eq!(ids, ["a", "b", "c", "d"]);
        assert_eq!(count, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_slices_but_counts_everything() -> TestResult {
        let (ids, count) = ids(&format!("{BASE}?offset=1&limit=2")).await?;

        assert_eq!(ids, ["b", "c"]);
        assert_eq!(count, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_offset_past_end_is_empty() -> TestResult {
        let (ids, count) = ids(&format!("{BASE}?offset=10")).await?;

        assert!(ids.is_empty());
        assert_eq!(count, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_index_rejects_bad_query_with_422() -> TestResult {
        for query in ["offset=-1", "limit=0", "limit=ten"] {
            let mut res = TestClient::get(format!("{BASE}?{query}"))
                .send(&seeded_service(&[]))
                .await;

            assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));
            let body: Value = res.take_json().await?;
            assert!(body["detail"].is_string(), "{query}: {body}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_index_of_empty_store() -> TestResult {
        let body: Value = TestClient::get(BASE)
            .send(&seeded_service(&[]))
            .await
            .take_json()
            .await?;

        assert_eq!(body, json!({ "entities": [], "count": 0 }));

        Ok(())
    }
}
