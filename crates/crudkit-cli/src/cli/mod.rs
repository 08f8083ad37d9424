//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "crudkit",
    bin_name = "crudkit",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold, prune and serve minimal CRUD web services",
    long_about = "crudkit generates a small CRUD web service (record model, in-memory \
                  repository, service layer, HTTP endpoints), removes the example \
                  record after generation when asked to, and can run the reference \
                  service directly.",
    after_help = "EXAMPLES:\n\
        \x20 crudkit new inventory-api\n\
        \x20 crudkit new blank-api --no-example\n\
        \x20 crudkit post-gen '{\"cookiecutter\": {\"include_entity_example\": \"no\"}}'\n\
        \x20 crudkit serve --port 8000 --resource product",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a new CRUD service project.
    #[command(
        visible_alias = "n",
        about = "Create a new CRUD service project",
        after_help = "EXAMPLES:\n\
            \x20 crudkit new inventory-api\n\
            \x20 crudkit new inventory-api --description \"Stock levels\" --api-prefix /api/v2\n\
            \x20 crudkit new blank-api --no-example --yes\n\
            \x20 crudkit new ../elsewhere/shop --dry-run"
    )]
    New(NewArgs),

    /// Remove the example record from a generated project.
    #[command(
        name = "post-gen",
        about = "Run the post-generation prune step",
        after_help = "The include flag is read from, in order: the CONTEXT argument,\n\
            COOKIECUTTER_CONTEXT, COOKIECUTTER_INCLUDE_ENTITY_EXAMPLE, the project's\n\
            .cookiecutter.json, and finally whether src/api/router.rs imports the\n\
            example endpoints. Only the value \"no\" removes anything.\n\n\
            EXAMPLES:\n\
            \x20 crudkit post-gen --root ./blank-api\n\
            \x20 crudkit post-gen '{\"cookiecutter\": {\"include_entity_example\": \"no\"}}'\n\
            \x20 COOKIECUTTER_INCLUDE_ENTITY_EXAMPLE=no crudkit post-gen --dry-run"
    )]
    PostGen(PostGenArgs),

    /// Run the reference CRUD service.
    #[command(
        about = "Serve the reference CRUD API",
        after_help = "EXAMPLES:\n\
            \x20 crudkit serve\n\
            \x20 crudkit serve --host 0.0.0.0 --port 8080\n\
            \x20 crudkit serve --resource product --api-prefix /api/v2 --debug"
    )]
    Serve(ServeArgs),

    /// Initialise a crudkit configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 crudkit init           # default location\n\
            \x20 crudkit init --global  # global config\n\
            \x20 crudkit init --local   # local config in CWD"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 crudkit completions bash > ~/.local/share/bash-completion/completions/crudkit\n\
            \x20 crudkit completions zsh  > ~/.zfunc/_crudkit\n\
            \x20 crudkit completions fish > ~/.config/fish/completions/crudkit.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the crudkit configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 crudkit config get server.port\n\
            \x20 crudkit config list\n\
            \x20 crudkit config path"
    )]
    Config(ConfigCommands),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::New(_) => "new",
            Self::PostGen(_) => "post-gen",
            Self::Serve(_) => "serve",
            Self::Init(_) => "init",
            Self::Completions(_) => "completions",
            Self::Config(_) => "config",
        }
    }
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project name or path.  A plain name creates `./name`; a path like
    /// `../foo` places the project one level up.
    #[arg(value_name = "NAME", help = "Project name or path")]
    pub name: String,

    /// Parent directory for the project.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "DIR",
        help = "Output directory (default: current directory)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'd',
        long = "description",
        value_name = "TEXT",
        help = "Project description"
    )]
    pub description: Option<String>,

    #[arg(
        long = "api-prefix",
        value_name = "PREFIX",
        help = "Route prefix for the record endpoints (default: /api/v1)"
    )]
    pub api_prefix: Option<String>,

    /// Raw value of the include flag; only "no" (any case) drops the example.
    #[arg(
        long = "include-entity-example",
        value_name = "VALUE",
        conflicts_with = "no_example",
        help = "Keep the example record (\"no\" removes it)"
    )]
    pub include_entity_example: Option<String>,

    /// Shorthand for `--include-entity-example no`.
    #[arg(long = "no-example", help = "Generate without the example record")]
    pub no_example: bool,

    /// Skip the confirmation prompt.
    #[arg(
        short = 'y',
        long = "yes",
        help = "Skip confirmation and create immediately"
    )]
    pub yes: bool,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,
}

impl NewArgs {
    /// The include flag given on the command line, if any.
    pub fn include_flag(&self) -> Option<String> {
        if self.no_example {
            Some("no".to_string())
        } else {
            self.include_entity_example.clone()
        }
    }
}

// ── post-gen ──────────────────────────────────────────────────────────────────

/// Arguments for `crudkit post-gen`.
#[derive(Debug, Args)]
pub struct PostGenArgs {
    /// Generation context as JSON, e.g. `{"cookiecutter": {...}}`.
    #[arg(value_name = "CONTEXT", help = "Generation context (JSON)")]
    pub context: Option<String>,

    /// Root of the generated project.
    #[arg(
        short = 'r',
        long = "root",
        value_name = "DIR",
        default_value = ".",
        help = "Project root (default: current directory)"
    )]
    pub root: PathBuf,

    #[arg(long = "dry-run", help = "Report what would be removed without removing")]
    pub dry_run: bool,
}

// ── serve ─────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit serve`. Unset options fall back to the `[server]`
/// and `[resource]` configuration sections.
#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long = "host", value_name = "HOST", help = "Address to bind")]
    pub host: Option<String>,

    #[arg(short = 'p', long = "port", value_name = "PORT", help = "Port to bind")]
    pub port: Option<u16>,

    #[arg(
        long = "api-prefix",
        value_name = "PREFIX",
        help = "Route prefix for the record endpoints"
    )]
    pub api_prefix: Option<String>,

    #[arg(
        long = "resource",
        value_enum,
        value_name = "RESOURCE",
        help = "Record naming: entity/entities or product/products"
    )]
    pub resource: Option<ResourceFlavor>,

    #[arg(
        long = "project-name",
        value_name = "NAME",
        help = "Name reported by the root endpoint"
    )]
    pub project_name: Option<String>,

    /// Raise the log level to at least DEBUG.
    #[arg(long = "debug", help = "Enable debug logging")]
    pub debug: bool,
}

/// Built-in naming schemes for the served record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ResourceFlavor {
    Entity,
    Product,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `crudkit init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write to the global config location.
    #[arg(long = "global", help = "Create global configuration")]
    pub global: bool,

    /// Write to `.crudkit.toml` in the current directory.
    #[arg(
        long = "local",
        conflicts_with = "global",
        help = "Create local configuration in current directory"
    )]
    pub local: bool,

    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `crudkit completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `crudkit config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `server.port`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
