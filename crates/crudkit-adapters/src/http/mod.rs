//! HTTP surface of the record service.
//!
//! | method | path                     | success |
//! |--------|--------------------------|---------|
//! | GET    | `/`                      | 200     |
//! | GET    | `/health`                | 200     |
//! | GET    | `{prefix}/{plural}`      | 200     |
//! | POST   | `{prefix}/{plural}`      | 201     |
//! | GET    | `{prefix}/{plural}/{id}` | 200     |
//! | PUT    | `{prefix}/{plural}/{id}` | 200     |
//! | DELETE | `{prefix}/{plural}/{id}` | 204     |

pub mod errors;
pub(crate) mod extensions;
mod handlers;
pub mod schemas;
pub mod shutdown;
pub mod state;
#[cfg(test)]
pub(crate) mod test_helpers;

use std::net::SocketAddr;
use std::sync::Arc;

use salvo::{
    affix_state::inject, catch_panic::CatchPanic, prelude::*, trailing_slash::remove_slash,
};
use thiserror::Error;
use tracing::{error, info};

pub use errors::ApiError;
pub use state::AppState;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: salvo::Error,
    },
}

/// Route table rooted at `/`, with the record routes under `api_prefix`.
pub fn app_router(state: Arc<AppState>, api_prefix: &str) -> Router {
    let prefix = api_prefix.trim_matches('/');
    let collection = if prefix.is_empty() {
        state.names.plural().to_string()
    } else {
        format!("{prefix}/{}", state.names.plural())
    };

    Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(state))
        .get(handlers::root::handler)
        .push(Router::with_path("health").get(handlers::health::handler))
        .push(
            Router::with_path(collection)
                .get(handlers::index::handler)
                .post(handlers::create::handler)
                .push(
                    Router::with_path("{id}")
                        .get(handlers::get::handler)
                        .put(handlers::update::handler)
                        .delete(handlers::delete::handler),
                ),
        )
}

/// Bind `addr` and serve until Ctrl+C or SIGTERM.
pub async fn serve(addr: SocketAddr, router: Router) -> Result<(), ServeError> {
    let listener = TcpListener::new(addr)
        .try_bind()
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;

    info!("Listening on http://{addr}");

    let server = Server::new(listener);
    let handle = server.handle();

    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    server.serve(router).await;
    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::{Value, json};
    use testresult::TestResult;

    use crudkit_core::domain::{RepositoryKind, ResourceNames};

    use super::*;

    #[tokio::test]
    async fn test_product_naming_and_custom_prefix() -> TestResult {
        let state = AppState::new(RepositoryKind::Memory, ResourceNames::product(), "shop").shared();
        let service = Service::new(app_router(state, "/v2/"));

        let res = TestClient::post("http://example.com/v2/products")
            .json(&json!({ "name": "Lamp", "price": 12.0 }))
            .send(&service)
            .await;
        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let body: Value = TestClient::get("http://example.com/v2/products")
            .send(&service)
            .await
            .take_json()
            .await?;
        assert_eq!(body["count"], json!(1));
        assert_eq!(body["products"][0]["name"], json!("Lamp"));

        let body: Value = TestClient::get("http://example.com/v2/products/nope")
            .send(&service)
            .await
            .take_json()
            .await?;
        assert_eq!(body["product_id"], json!("nope"));

        Ok(())
    }
}
