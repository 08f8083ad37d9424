//! Errors reported by `crudkit` commands.
//!
//! Each [`CliError`] knows its hints for the user, its [`ErrorCategory`]
//! and therefore its process exit code.

use std::error::Error;
use std::io;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use crudkit_core::error::{CrudkitError, ErrorCategory as CoreCategory};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// A flag or argument value the command cannot use.
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// Unreadable or invalid configuration, or a config file that could not
    /// be written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("{0}")]
    Core(#[from] CrudkitError),

    /// The reference service failed to bind or stopped with an error.
    #[error("Server error: {message}")]
    Server {
        message: String,
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },

    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },

    /// The user declined the confirmation prompt.
    #[error("Operation cancelled")]
    Cancelled,
}

impl From<io::Error> for CliError {
    fn from(source: io::Error) -> Self {
        Self::IoError {
            message: source.to_string(),
            source,
        }
    }
}

/// How a failure is classified; decides the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    UserError,
    NotFound,
    Configuration,
    Internal,
}

impl ErrorCategory {
    /// 2 for user mistakes, 3 for missing things, 4 for configuration,
    /// 1 for everything else.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::UserError => 2,
            Self::NotFound => 3,
            Self::Configuration => 4,
            Self::Internal => 1,
        }
    }
}

impl CliError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { .. } => {
                vec!["Run the command with --help to see accepted values".into()]
            }
            Self::ProjectExists { path } => vec![
                format!("Remove or rename {}", path.display()),
                "Pick another project name, or --output to generate elsewhere".into(),
            ],
            Self::InvalidProjectName { .. } => vec![
                "Use letters, digits, spaces, '-' or '_'".into(),
                "Examples: inventory-api, shop_service, \"Inventory API\"".into(),
            ],
            Self::ConfigError { .. } => vec![
                format!(
                    "Inspect {} and any ./{}",
                    crate::config::AppConfig::config_path().display(),
                    crate::config::LOCAL_CONFIG_FILE
                ),
                "Check CRUDKIT_* environment variables".into(),
                "'crudkit init --force' rewrites the file with defaults".into(),
            ],
            Self::Core(core) => core.suggestions(),
            Self::Server { .. } => vec![
                "Check that the port is free and the host address is valid".into(),
                "Override with --host / --port or CRUDKIT_SERVER__PORT".into(),
            ],
            Self::IoError { .. } => {
                vec!["Check that the target directory exists and is writable".into()]
            }
            Self::Cancelled => vec!["Nothing was written".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. }
            | Self::ProjectExists { .. }
            | Self::InvalidProjectName { .. }
            | Self::Cancelled => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::Server { .. } | Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.category().exit_code()
    }

    /// Message, cause chain when `verbose`, hints, and otherwise a pointer
    /// to `-v`. ANSI styling only when `color`.
    pub fn render(&self, color: bool, verbose: bool) -> String {
        let paint = |text: &str, style: fn(&str) -> String| {
            if color { style(text) } else { text.to_owned() }
        };
        let mut out = String::new();

        out.push('\n');
        out.push_str(&paint("\u{2717} Error:", |t| t.red().bold().to_string()));
        out.push_str("\n  ");
        out.push_str(&paint(&self.to_string(), |t| t.red().to_string()));
        out.push('\n');

        if verbose {
            let mut cause = self.source();
            while let Some(err) = cause {
                let line = format!("Caused by: {err}");
                out.push_str("  ");
                out.push_str(&paint(&line, |t| t.dimmed().to_string()));
                out.push('\n');
                cause = err.source();
            }
        }

        let hints = self.suggestions();
        if !hints.is_empty() {
            out.push('\n');
            out.push_str(&paint("Suggestions:", |t| t.yellow().bold().to_string()));
            out.push('\n');
            for hint in hints {
                out.push_str("  ");
                out.push_str(&hint);
                out.push('\n');
            }
        }

        if !verbose {
            out.push('\n');
            out.push_str(&paint("Use -v / --verbose for more details.", |t| {
                t.dimmed().to_string()
            }));
            out.push('\n');
        }

        out
    }

    /// Record the failure: warnings for user mistakes, errors otherwise.
    pub fn log(&self) {
        let category = self.category();
        match category {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(?category, error = %self, "command failed")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, error = %self, "command failed")
            }
        }
        if let Some(source) = self.source() {
            tracing::debug!(%source, "underlying cause");
        }
    }
}

/// Describe what was being attempted when an I/O call failed.
pub trait IoContext<T> {
    fn io_context<S: Into<String>>(self, what: impl FnOnce() -> S) -> CliResult<T>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn io_context<S: Into<String>>(self, what: impl FnOnce() -> S) -> CliResult<T> {
        self.map_err(|source| CliError::IoError {
            message: what().into(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crudkit_core::{application::ApplicationError, domain::DomainError};

    fn core(err: impl Into<CrudkitError>) -> CliError {
        CliError::Core(err.into())
    }

    #[test]
    fn existing_project_points_at_output_flag() {
        let err = CliError::ProjectExists {
            path: PathBuf::from("/tmp/test"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("--output")));
    }

    #[test]
    fn core_hints_are_forwarded() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/shop"),
        });
        assert!(err.suggestions().iter().any(|s| s.contains("/tmp/shop")));
    }

    #[test]
    fn every_category_has_its_exit_code() {
        let invalid = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        let config = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        let server = CliError::Server {
            message: "bind".into(),
            source: None,
        };
        let io_err = CliError::from(io::Error::other("e"));

        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(CliError::Cancelled.exit_code(), 2);
        assert_eq!(core(DomainError::EntityNotFound { id: "x".into() }).exit_code(), 3);
        assert_eq!(config.exit_code(), 4);
        assert_eq!(server.exit_code(), 1);
        assert_eq!(io_err.exit_code(), 1);
    }

    #[test]
    fn boxed_sources_are_chained() {
        let err = CliError::ConfigError {
            message: "parse failed".into(),
            source: Some(Box::new(io::Error::other("bad toml"))),
        };
        assert_eq!(err.source().map(|s| s.to_string()).as_deref(), Some("bad toml"));

        let bare = CliError::InvalidInput {
            message: "x".into(),
            source: None,
        };
        assert!(bare.source().is_none());
    }

    #[test]
    fn core_validation_is_a_user_error() {
        assert_eq!(core(DomainError::EmptyName).category(), ErrorCategory::UserError);
    }

    #[test]
    fn plain_render_has_header_and_suggestions() {
        let err = CliError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.render(false, false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains('\u{1b}'));
    }

    #[test]
    fn verbose_render_shows_cause_and_omits_hint() {
        let err = CliError::IoError {
            message: "writing context".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.render(false, true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }

    #[test]
    fn io_context_keeps_the_description() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let err = result.io_context(|| "reading config").unwrap_err();
        assert!(matches!(err, CliError::IoError { message, .. } if message == "reading config"));
    }
}
