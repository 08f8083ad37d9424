//! Error responses.
//!
//! | case                       | status | body                                   |
//! |----------------------------|--------|----------------------------------------|
//! | record not found           | 404    | `{"error": ..., "<singular>_id": id}`  |
//! | record validation          | 400    | `{"error": ...}`                       |
//! | malformed body or query    | 422    | `{"detail": ...}`                      |
//! | anything else              | 500    | `{"error": "Internal server error"}`   |

use salvo::prelude::*;
use serde_json::{Map, Value, json};
use tracing::error;

use crudkit_core::{
    domain::ResourceNames,
    error::{CrudkitError, ErrorCategory},
};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    NotFound {
        message: String,
        id_key: String,
        id: String,
    },
    Validation(String),
    Unprocessable(String),
    Internal(String),
}

impl ApiError {
    /// Map a service error using the resource's display names.
    pub fn from_service(err: CrudkitError, names: &ResourceNames) -> Self {
        if let Some(id) = err.missing_id() {
            return Self::NotFound {
                message: names.not_found_message(id),
                id_key: names.id_key(),
                id: id.to_string(),
            };
        }

        match err.category() {
            ErrorCategory::Validation => Self::Validation(err.to_string()),
            _ => Self::Internal(err.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> Value {
        match self {
            Self::NotFound {
                message,
                id_key,
                id,
            } => {
                let mut body = Map::new();
                body.insert("error".into(), Value::String(message.clone()));
                body.insert(id_key.clone(), Value::String(id.clone()));
                Value::Object(body)
            }
            Self::Validation(message) => json!({ "error": message }),
            Self::Unprocessable(detail) => json!({ "detail": detail }),
            Self::Internal(_) => json!({ "error": "Internal server error" }),
        }
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        if let Self::Internal(reason) = &self {
            error!(%reason, "request failed");
        }
        res.status_code(self.status());
        res.render(Json(self.body()));
    }
}
