//! `crudkit post-gen`: prune the example record from a generated project.
//!
//! Never fails. Unreadable inputs and undeletable files are reported, and the
//! command still exits 0.

use std::sync::Arc;

use serde_json::{Value, json};
use tracing::{info, instrument, warn};

use crudkit_adapters::{LocalFilesystem, ProcessEnvironment};
use crudkit_core::{application::PostGenService, domain::PruneReport};

use crate::{cli::PostGenArgs, error::CliResult, output::OutputManager};

#[instrument(skip_all, fields(root = %args.root.display(), dry_run = args.dry_run))]
pub fn execute(args: PostGenArgs, output: OutputManager) -> CliResult<()> {
    let service = PostGenService::new(
        Arc::new(LocalFilesystem::new()),
        Arc::new(ProcessEnvironment),
    );

    let report = service.run(&args.root, args.context.as_deref(), args.dry_run);
    info!(removed = report.removed_count(), "Post-generation finished");

    finish(print_report(&report, &output))
}

/// Output problems must not turn into a failing exit code.
fn finish(printed: std::io::Result<()>) -> CliResult<()> {
    if let Err(e) = printed {
        warn!(error = %e, "Could not print the post-generation report");
    }
    Ok(())
}

/// Show a prune report the way the user asked for.
pub fn print_report(report: &PruneReport, output: &OutputManager) -> std::io::Result<()> {
    if output.is_json() {
        return output.json(&report_json(report));
    }

    if let Some(summary) = report.summary() {
        output.success(&summary)?;
    }
    for failure in &report.failures {
        output.warning(&format!(
            "Could not remove {}: {}",
            failure.path.display(),
            failure.reason
        ))?;
    }
    Ok(())
}

/// JSON view of a prune report.
pub fn report_json(report: &PruneReport) -> Value {
    let paths = |list: &[std::path::PathBuf]| -> Vec<String> {
        list.iter().map(|p| p.display().to_string()).collect()
    };

    json!({
        "include_entity_example": report.flag.as_ref().map(|(flag, _)| flag.as_str()),
        "source": report.flag.as_ref().map(|(_, source)| source.describe()),
        "pruned": report.pruned(),
        "dry_run": report.dry_run,
        "removed": paths(&report.removed),
        "skipped": paths(&report.skipped),
        "failures": report.failures.iter().map(|f| json!({
            "path": f.path.display().to_string(),
            "reason": f.reason,
        })).collect::<Vec<_>>(),
        "summary": report.summary(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crudkit_core::domain::{FlagSource, IncludeFlag, PruneFailure};

    #[test]
    fn json_view_of_a_pruned_run() {
        let report = PruneReport {
            flag: Some((IncludeFlag::no(), FlagSource::FlagEnv)),
            removed: vec![PathBuf::from("src/schemas/entity.rs")],
            skipped: vec![PathBuf::from("tests/entity_flow.rs")],
            failures: vec![],
            dry_run: false,
        };
        let value = report_json(&report);

        assert_eq!(value["include_entity_example"], "no");
        assert_eq!(value["pruned"], true);
        assert_eq!(value["removed"][0], "src/schemas/entity.rs");
        assert_eq!(value["skipped"].as_array().map(Vec::len), Some(1));
        assert!(
            value["summary"]
                .as_str()
                .is_some_and(|s| s.starts_with("Removed 1"))
        );
    }

    #[test]
    fn json_view_of_an_unresolved_run() {
        let report = PruneReport {
            failures: vec![PruneFailure {
                path: PathBuf::from("x"),
                reason: "denied".into(),
            }],
            ..Default::default()
        };
        let value = report_json(&report);

        assert!(value["include_entity_example"].is_null());
        assert!(value["source"].is_null());
        assert_eq!(value["pruned"], false);
        assert!(value["summary"].is_null());
        assert_eq!(value["failures"][0]["reason"], "denied");
    }

    #[test]
    fn unprintable_report_still_succeeds() {
        let broken = Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        assert!(finish(broken).is_ok());
        assert!(finish(Ok(())).is_ok());
    }
}
