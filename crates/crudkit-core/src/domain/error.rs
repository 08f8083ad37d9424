//! Failures raised by domain values themselves.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Invalid records, missing records and malformed templates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("Entity id cannot be empty")]
    EmptyId,

    #[error("Entity name cannot be empty")]
    EmptyName,

    #[error("Entity price cannot be negative")]
    NegativePrice { price: f64 },

    #[error("Entity price must be a finite number")]
    NonFinitePrice,

    #[error("Entity validation failed: {0}")]
    EntityValidation(String),

    #[error("Entity '{id}' not found")]
    EntityNotFound { id: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template_id}' has no content")]
    EmptyTemplate { template_id: String },

    #[error("Path listed twice in template: {path}")]
    DuplicatePath { path: String },

    /// Template paths must stay below the project root.
    #[error("Path escapes the project root: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyId => vec!["Provide a non-blank identifier".into()],
            Self::EmptyName => vec!["Provide a non-blank name".into()],
            Self::NegativePrice { price } => vec![
                format!("Price {} is below zero", price),
                "Use 0 or a positive amount".into(),
            ],
            Self::NonFinitePrice => vec!["Use a finite, non-negative price".into()],
            Self::EntityNotFound { id } => vec![
                format!("No record is stored under id '{}'", id),
                "List records first to find a valid id".into(),
            ],
            Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::MissingRequiredField { .. } => {
                vec!["The built-in template is broken; this is a crudkit bug".into()]
            }
            Self::EntityValidation(_) => vec!["Check the submitted fields".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyId
            | Self::EmptyName
            | Self::NegativePrice { .. }
            | Self::NonFinitePrice
            | Self::EntityValidation(_)
            | Self::InvalidTemplate(_) => ErrorCategory::Validation,
            Self::EntityNotFound { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}
