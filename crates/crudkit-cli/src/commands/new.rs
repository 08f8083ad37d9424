//! Implementation of the `crudkit new` command.
//!
//! Responsibility: translate CLI arguments into a `RenderContext`, call the
//! core scaffold and post-generation services, and display results. No
//! business logic lives here.

use std::io::IsTerminal as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, instrument};

use crudkit_adapters::{LocalFilesystem, ProcessEnvironment, SimpleRenderer, builtin_templates};
use crudkit_core::{
    application::{PostGenService, ScaffoldService, ports::Filesystem},
    domain::{
        EXAMPLE_FILES, IncludeFlag, RenderContext,
        post_gen::{CONTEXT_FILE, CONTEXT_KEY, FLAG_KEY},
    },
};

use crate::{
    cli::{NewArgs, global::GlobalArgs},
    commands::post_gen,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `crudkit new` command.
///
/// 1. Resolve and validate the project name and location
/// 2. Build the render context from flags over `[scaffold]` config
/// 3. Confirm with the user (interactive terminals only)
/// 4. Stop after a preview on `--dry-run`
/// 5. Write the project, then its `.cookiecutter.json`
/// 6. Run the post-generation prune with that context
/// 7. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Resolve project path
    let (project_name, parent) = resolve_project_path(&args.name, args.output.as_deref())?;
    validate_project_name(&project_name)?;

    // 2. Render context
    let context = build_context(&project_name, &args, &config);
    let slug = context
        .get("PROJECT_SLUG")
        .unwrap_or(project_name.as_str())
        .to_string();
    let project_path = parent.join(&slug);
    let include = context.get("INCLUDE_ENTITY_EXAMPLE").unwrap_or("yes").to_string();

    debug!(
        slug = %slug,
        path = %project_path.display(),
        include_entity_example = %include,
        "Context resolved"
    );

    // 3. Show configuration and confirm
    let interactive = std::io::stdin().is_terminal() && !output.is_json();
    if !output.is_quiet() && !args.yes && !args.dry_run && interactive {
        show_configuration(&context, &project_path, &output)?;
        if !confirm()? {
            return Err(CliError::Cancelled);
        }
    }

    // 4. Refuse to touch an existing directory
    if project_path.exists() {
        return Err(CliError::ProjectExists { path: project_path });
    }

    let template = builtin_templates::crud_service().map_err(|e| CliError::Core(e.into()))?;
    let filesystem: Arc<dyn Filesystem> = Arc::new(LocalFilesystem::new());
    let scaffold = ScaffoldService::new(Box::new(SimpleRenderer::new()), filesystem.clone());

    let prunes = IncludeFlag::new(include.as_str()).is_some_and(|f| f.is_no());

    if args.dry_run {
        let structure = scaffold.preview(&template, &context, &project_path)?;
        let files = structure.files().count();

        if output.is_json() {
            output.json(&json!({
                "project": project_name,
                "path": project_path.display().to_string(),
                "dry_run": true,
                "files": files,
                "include_entity_example": include,
                "would_remove": if prunes { EXAMPLE_FILES.to_vec() } else { Vec::new() },
            }))?;
            return Ok(());
        }

        output.info(&format!(
            "Dry run: would create '{}' at {}",
            project_name,
            project_path.display(),
        ))?;
        output.info(&format!("  Files:        {files}"))?;
        output.info(&format!("  API prefix:   {}", context.get("API_PREFIX").unwrap_or_default()))?;
        if prunes {
            output.info(&format!(
                "  Would remove {} entity example file(s) after generation",
                EXAMPLE_FILES.len()
            ))?;
        }
        return Ok(());
    }

    // 5. Scaffold
    output.header(&format!("Creating '{project_name}'..."))?;
    info!(project = %project_name, path = %project_path.display(), "Scaffold started");

    let spinner = output.spinner("Rendering template");
    let written = scaffold.scaffold(&template, &context, &project_path);
    if let Some(bar) = &spinner {
        bar.finish_and_clear();
    }
    let structure = written?;

    let context_json = context_document(&context);
    filesystem.write_file(&project_path.join(CONTEXT_FILE), &context_json)?;

    // 6. Post-generation
    let report = PostGenService::new(filesystem, Arc::new(ProcessEnvironment)).run(
        &project_path,
        Some(&context_json),
        false,
    );

    info!(
        project = %project_name,
        files = structure.files().count(),
        removed = report.removed_count(),
        "Scaffold completed"
    );

    if output.is_json() {
        output.json(&json!({
            "project": project_name,
            "path": project_path.display().to_string(),
            "files": structure.files().count() - report.removed_count(),
            "post_gen": post_gen::report_json(&report),
        }))?;
        return Ok(());
    }

    post_gen::print_report(&report, &output)?;

    // 7. Success + next steps
    output.success(&format!("Project '{project_name}' created!"))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}", project_path.display()))?;
        output.print("  cargo test")?;
        output.print("  cargo run")?;
    }

    Ok(())
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Split `name` into the project name (last component) and the directory
/// the project goes into. `--output` is prepended to that directory.
pub fn resolve_project_path(name: &str, output: Option<&Path>) -> CliResult<(String, PathBuf)> {
    let path = Path::new(name);

    let project_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::InvalidProjectName {
            name: name.into(),
            reason: "cannot extract valid project name".into(),
        })?
        .to_string();

    let nested = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty() && *p != Path::new("."));

    let parent = match (output, nested) {
        (Some(dir), Some(nested)) => dir.join(nested),
        (Some(dir), None) => dir.to_path_buf(),
        (None, Some(nested)) => nested.to_path_buf(),
        (None, None) => PathBuf::from("."),
    };

    Ok((project_name, parent))
}

fn validate_project_name(name: &str) -> CliResult<()> {
    let invalid = |reason: &str| CliError::InvalidProjectName {
        name: name.into(),
        reason: reason.into(),
    };

    if name.trim().is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name.starts_with('.') {
        return Err(invalid("name cannot start with '.'"));
    }
    if name.contains('/') || name.contains('\\') {
        return Err(invalid("name cannot contain path separators"));
    }
    if let Some(c) = name
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | ' ')))
    {
        return Err(invalid(&format!("character '{c}' is not allowed")));
    }
    if !name.chars().any(char::is_alphanumeric) {
        return Err(invalid("name must contain a letter or digit"));
    }
    Ok(())
}

// ── Context ───────────────────────────────────────────────────────────────────

fn build_context(project_name: &str, args: &NewArgs, config: &AppConfig) -> RenderContext {
    let scaffold = &config.scaffold;
    RenderContext::new(project_name)
        .with_description(
            args.description
                .clone()
                .unwrap_or_else(|| scaffold.description.clone()),
        )
        .with_api_prefix(
            args.api_prefix
                .clone()
                .unwrap_or_else(|| scaffold.api_prefix.clone()),
        )
        .with_include_entity_example(
            args.include_flag()
                .unwrap_or_else(|| scaffold.include_entity_example.clone()),
        )
}

/// The `{"cookiecutter": {...}}` document stored next to the project.
fn context_document(context: &RenderContext) -> String {
    let var = |key: &str| context.get(key).unwrap_or_default().to_string();
    let doc = json!({
        CONTEXT_KEY: {
            "project_name": context.project_name(),
            "project_slug": var("PROJECT_SLUG"),
            "description": var("DESCRIPTION"),
            "api_prefix": var("API_PREFIX"),
            FLAG_KEY: var("INCLUDE_ENTITY_EXAMPLE"),
        }
    });
    let mut text = serde_json::to_string_pretty(&doc).unwrap_or_else(|_| doc.to_string());
    text.push('\n');
    text
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(
    context: &RenderContext,
    project_path: &Path,
    out: &OutputManager,
) -> CliResult<()> {
    let var = |key: &str| context.get(key).unwrap_or_default().to_string();
    out.header("Configuration")?;
    out.print(&format!("  Project:      {}", context.project_name()))?;
    out.print(&format!("  Description:  {}", var("DESCRIPTION")))?;
    out.print(&format!("  API prefix:   {}", var("API_PREFIX")))?;
    out.print(&format!("  Example:      {}", var("INCLUDE_ENTITY_EXAMPLE")))?;
    out.print(&format!("  Location:     {}", project_path.display()))?;
    out.print("")?;
    Ok(())
}

#[cfg(feature = "interactive")]
fn confirm() -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt("Continue?")
        .default(true)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm() -> CliResult<bool> {
    use std::io::{self, Write};

    use crate::error::IoContext;

    print!("Continue? [Y/n] ");
    io::stdout()
        .flush()
        .io_context(|| "failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .io_context(|| "failed to read confirmation input")?;

    let input = input.trim().to_ascii_lowercase();
    Ok(input.is_empty() || input == "y" || input == "yes")
}

// ── Tests ─────────────────────────────────────────────────────────────────────
