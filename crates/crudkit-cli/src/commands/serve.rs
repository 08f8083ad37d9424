//! `crudkit serve`: run the reference CRUD service until Ctrl-C / SIGTERM.

use std::net::{SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use tracing::{info, instrument};

use crudkit_adapters::{AppState, app_router, serve};
use crudkit_core::domain::{RepositoryKind, ResourceNames};

use crate::{
    cli::{ResourceFlavor, ServeArgs},
    config::AppConfig,
    error::{CliError, CliResult, IoContext},
    output::OutputManager,
};

/// Everything the server needs, after flags were laid over config.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ServeSettings {
    addr: SocketAddr,
    api_prefix: String,
    names: ResourceNames,
    kind: RepositoryKind,
    project_name: String,
}

#[instrument(skip_all)]
pub fn execute(args: ServeArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let settings = resolve(&args, &config)?;

    let state = AppState::new(settings.kind, settings.names.clone(), &settings.project_name);
    let router = app_router(state.shared(), &settings.api_prefix);

    output.info(&format!(
        "Serving {} at http://{}{}/{}",
        settings.names.plural(),
        settings.addr,
        normalized_prefix(&settings.api_prefix),
        settings.names.plural(),
    ))?;
    info!(
        addr = %settings.addr,
        repository = %settings.kind,
        prefix = %settings.api_prefix,
        "Starting server"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .io_context(|| "starting async runtime")?;

    runtime
        .block_on(serve(settings.addr, router))
        .map_err(|e| CliError::Server {
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;

    output.info("Server stopped")?;
    Ok(())
}

fn resolve(args: &ServeArgs, config: &AppConfig) -> CliResult<ServeSettings> {
    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = socket_addr(host, port)?;

    let names = match args.resource {
        Some(ResourceFlavor::Entity) => ResourceNames::entity(),
        Some(ResourceFlavor::Product) => ResourceNames::product(),
        None => ResourceNames::new(&config.resource.singular, &config.resource.plural)
            .map_err(|e| config_error("resource", e))?,
    };

    let kind = RepositoryKind::from_str(&config.repository.kind)
        .map_err(|e| config_error("repository.kind", e))?;

    Ok(ServeSettings {
        addr,
        api_prefix: args
            .api_prefix
            .clone()
            .unwrap_or_else(|| config.server.api_prefix.clone()),
        names,
        kind,
        project_name: args
            .project_name
            .clone()
            .unwrap_or_else(|| config.server.project_name.clone()),
    })
}

fn socket_addr(host: &str, port: u16) -> CliResult<SocketAddr> {
    let invalid = |source: Option<std::io::Error>| CliError::InvalidInput {
        message: format!("cannot bind to '{host}:{port}'"),
        source: source.map(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
    };

    (host, port)
        .to_socket_addrs()
        .map_err(|e| invalid(Some(e)))?
        .next()
        .ok_or_else(|| invalid(None))
}

fn config_error(key: &str, err: impl std::error::Error + Send + Sync + 'static) -> CliError {
    CliError::ConfigError {
        message: format!("invalid '{key}': {err}"),
        source: Some(Box::new(err)),
    }
}

fn normalized_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> ServeArgs {
        ServeArgs {
            host: None,
            port: None,
            api_prefix: None,
            resource: None,
            project_name: None,
            debug: false,
        }
    }

    #[test]
    fn config_defaults_apply() {
        let settings = resolve(&args(), &AppConfig::default()).unwrap();
        assert_eq!(settings.addr, "0.0.0.0:8000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.api_prefix, "/api/v1");
        assert_eq!(settings.names, ResourceNames::entity());
        assert_eq!(settings.kind, RepositoryKind::Memory);
    }

    #[test]
    fn flags_override_config() {
        let mut a = args();
        a.port = Some(9100);
        a.resource = Some(ResourceFlavor::Product);
        a.api_prefix = Some("/api/v2/".into());

        let settings = resolve(&a, &AppConfig::default()).unwrap();
        assert_eq!(settings.addr.port(), 9100);
        assert_eq!(settings.names.plural(), "products");
        assert_eq!(normalized_prefix(&settings.api_prefix), "/api/v2");
    }

    #[test]
    fn configured_resource_names_are_used() {
        let mut config = AppConfig::default();
        config.resource.singular = "Widget".into();
        config.resource.plural = "Widgets".into();

        let settings = resolve(&args(), &config).unwrap();
        assert_eq!(settings.names.plural(), "widgets");
    }

    #[test]
    fn unknown_repository_is_a_config_error() {
        let mut config = AppConfig::default();
        config.repository.kind = "postgres".into();

        let err = resolve(&args(), &config).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn empty_resource_name_is_a_config_error() {
        let mut config = AppConfig::default();
        config.resource.plural = " ".into();
        assert!(matches!(
            resolve(&args(), &config),
            Err(CliError::ConfigError { .. })
        ));
    }

    #[test]
    fn prefix_normalization() {
        assert_eq!(normalized_prefix("/"), "");
        assert_eq!(normalized_prefix("api/v1"), "/api/v1");
    }
}
