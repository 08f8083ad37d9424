//! Orchestration failures: the domain was fine, something around it was not.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    #[error("Could not render the project: {reason}")]
    RenderingFailed { reason: String },

    #[error("{reason} ({path})")]
    FilesystemError { path: PathBuf, reason: String },

    /// A writer panicked while holding the record store lock.
    #[error("Record store is unavailable")]
    StoreLockError,

    /// The scaffold target is already on disk.
    #[error("Target directory already exists: {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { .. } => vec![
                "The built-in template could not be rendered".into(),
                "Re-run with -vv to see which file failed".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Check that {} is reachable and writable", path.display()),
                "Re-run with -v to see the underlying cause".into(),
            ],
            Self::StoreLockError => vec![
                "A previous request panicked while holding the store".into(),
                "Restart the service to recover".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Move {} aside, or pick another project name", path.display()),
                "--output generates under a different parent directory".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::RenderingFailed { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_project_is_a_user_mistake() {
        let err = ApplicationError::ProjectExists {
            path: PathBuf::from("shop"),
        };
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("shop")));
    }

    #[test]
    fn lock_poisoning_is_internal() {
        assert_eq!(
            ApplicationError::StoreLockError.category(),
            ErrorCategory::Internal
        );
    }
}
