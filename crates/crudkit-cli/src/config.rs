//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `CRUDKIT_*` environment variables, `__` between section and key
//!    (`CRUDKIT_SERVER__PORT=9000`)
//! 3. The file passed with `--config`, otherwise `.crudkit.toml` in the
//!    current directory over the per-user config file
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

/// Name of the project-local config file.
pub const LOCAL_CONFIG_FILE: &str = ".crudkit.toml";

const ENV_PREFIX: &str = "CRUDKIT";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Reference service settings (`crudkit serve`).
    pub server: ServerConfig,
    /// Naming of the served record.
    pub resource: ResourceConfig,
    pub repository: RepositoryConfig,
    /// Defaults for `crudkit new`.
    pub scaffold: ScaffoldConfig,
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub api_prefix: String,
    /// Name reported by `GET /`.
    pub project_name: String,
    /// Raise the log level to at least DEBUG while serving.
    pub debug: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8000,
            api_prefix: "/api/v1".into(),
            project_name: "crudkit".into(),
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceConfig {
    pub singular: String,
    pub plural: String,
}

impl Default for ResourceConfig {
    fn default() -> Self {
        Self {
            singular: "entity".into(),
            plural: "entities".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Storage backend; only "memory" exists.
    pub kind: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            kind: "memory".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScaffoldConfig {
    pub description: String,
    pub api_prefix: String,
    pub include_entity_example: String,
}

impl Default for ScaffoldConfig {
    fn default() -> Self {
        Self {
            description: "A minimal CRUD web service".into(),
            api_prefix: "/api/v1".into(),
            include_entity_example: "yes".into(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write logs (without colour) to this file.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "human".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration by layering defaults, file(s) and environment.
    ///
    /// An explicit `config_file` must exist; the implicit locations are
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let mut builder = Config::builder().add_source(defaults);

        builder = match config_file {
            Some(path) => builder.add_source(File::from(path.as_path()).required(true)),
            None => builder
                .add_source(File::from(Self::config_path()).required(false))
                .add_source(File::from(Path::new(LOCAL_CONFIG_FILE)).required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .context("Failed to read configuration sources")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(config)
    }

    /// Path to the per-user configuration file.
    ///
    /// Uses `directories::ProjectDirs`, falling back to `.crudkit.toml` in
    /// the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "crudkit", "crudkit")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_reference_service() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.server.api_prefix, "/api/v1");
        assert_eq!(cfg.resource.plural, "entities");
        assert_eq!(cfg.repository.kind, "memory");
        assert_eq!(cfg.scaffold.include_entity_example, "yes");
        assert!(cfg.logging.file.is_none());
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crudkit.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9100\n\n[resource]\nsingular = \"product\"\nplural = \"products\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.server.port, 9100);
        assert_eq!(cfg.resource.plural, "products");
        // Untouched keys keep their defaults.
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.scaffold.api_prefix, "/api/v1");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn defaults_survive_a_toml_round_trip() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let back: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.server.port, 8000);
        assert_eq!(back.output.format, "human");
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
