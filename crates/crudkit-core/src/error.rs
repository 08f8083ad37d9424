//! Crate-level error type.
//!
//! [`CrudkitError`] joins domain and application failures so adapters and
//! the CLI deal with a single type, and classifies them for exit codes and
//! HTTP status mapping.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

#[derive(Debug, Error, Clone)]
pub enum CrudkitError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl CrudkitError {
    /// Hints for the person who triggered the failure.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
        }
    }

    /// Id of the record a not-found error refers to.
    pub fn missing_id(&self) -> Option<&str> {
        match self {
            Self::Domain(DomainError::EntityNotFound { id }) => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}

pub type CrudkitResult<T> = Result<T, CrudkitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_carries_the_missing_id() {
        let err: CrudkitError = DomainError::EntityNotFound { id: "42".into() }.into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert_eq!(err.missing_id(), Some("42"));
    }

    #[test]
    fn validation_failures_have_no_missing_id() {
        let err: CrudkitError = DomainError::EmptyName.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.missing_id(), None);
    }

    #[test]
    fn poisoned_store_is_internal() {
        let err: CrudkitError = ApplicationError::StoreLockError.into();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn domain_message_passes_through_unprefixed() {
        let err: CrudkitError = DomainError::EntityNotFound { id: "abc".into() }.into();
        assert_eq!(err.to_string(), "Entity 'abc' not found");
    }
}
