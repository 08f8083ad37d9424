//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::Depot;

use crate::http::errors::ApiError;

pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, ApiError> {
        self.obtain::<T>()
            .map_err(|_ignored| ApiError::Internal("server state missing".into()))
    }
}
