//! Post-generation step: decide whether to keep the example record files and
//! prune them when the `include_entity_example` flag says "no".
//!
//! The flag is looked up through an ordered chain of sources; the first one
//! that yields a value wins:
//!
//! 1. the first argument (JSON literal or path to a JSON file)
//! 2. the `COOKIECUTTER_CONTEXT` environment variable
//! 3. the `COOKIECUTTER_INCLUDE_ENTITY_EXAMPLE` environment variable
//! 4. `.cookiecutter.json` in the project root
//! 5. whether `src/api/router.rs` still imports the example routes
//!
//! Every source fails silently. Deletion problems are logged and reported,
//! never returned as errors.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{Environment, Filesystem},
    domain::{
        EXAMPLE_FILES, FlagSource, IncludeFlag, PruneFailure, PruneReport,
        post_gen::{CONTEXT_ENV, CONTEXT_FILE, ENTITY_IMPORT_LINE, FLAG_ENV, ROUTER_FILE},
    },
};

pub struct PostGenService {
    filesystem: Arc<dyn Filesystem>,
    environment: Arc<dyn Environment>,
}

impl PostGenService {
    pub fn new(filesystem: Arc<dyn Filesystem>, environment: Arc<dyn Environment>) -> Self {
        Self {
            filesystem,
            environment,
        }
    }

    /// Resolve the flag and prune the example files when it is "no".
    ///
    /// With `dry_run` nothing is deleted; `removed` lists what would be.
    #[instrument(skip_all, fields(root = %root.display(), dry_run = dry_run))]
    pub fn run(&self, root: &Path, argument: Option<&str>, dry_run: bool) -> PruneReport {
        let flag = self.resolve_flag(root, argument);
        let mut report = PruneReport {
            flag: flag.clone(),
            dry_run,
            ..Default::default()
        };

        match &flag {
            Some((value, source)) if value.is_no() => {
                info!(source = %source, "include_entity_example is 'no', pruning examples");
                self.prune(root, &mut report);
            }
            Some((value, source)) => {
                debug!(value = %value, source = %source, "Keeping example files");
            }
            None => debug!("include_entity_example unresolved, keeping example files"),
        }

        report
    }

    /// Walk the fallback chain. `None` when no source yields a value.
    pub fn resolve_flag(
        &self,
        root: &Path,
        argument: Option<&str>,
    ) -> Option<(IncludeFlag, FlagSource)> {
        let found = argument
            .and_then(|arg| self.from_argument(root, arg))
            .map(|f| (f, FlagSource::Argument))
            .or_else(|| {
                self.environment
                    .var(CONTEXT_ENV)
                    .and_then(|ctx| IncludeFlag::from_context_str(&ctx, false))
                    .map(|f| (f, FlagSource::ContextEnv))
            })
            .or_else(|| {
                self.environment
                    .var(FLAG_ENV)
                    .and_then(IncludeFlag::new)
                    .map(|f| (f, FlagSource::FlagEnv))
            })
            .or_else(|| {
                self.read(&root.join(CONTEXT_FILE))
                    .and_then(|text| IncludeFlag::from_context_str(&text, true))
                    .map(|f| (f, FlagSource::ContextFile))
            })
            .or_else(|| {
                self.from_router(root)
                    .map(|f| (f, FlagSource::RouterHeuristic))
            });

        if let Some((flag, source)) = &found {
            debug!(flag = %flag, source = %source, "Resolved include_entity_example");
        }
        found
    }

    // -------------------------------------------------------------------------
    // Sources
    // -------------------------------------------------------------------------

    fn from_argument(&self, root: &Path, arg: &str) -> Option<IncludeFlag> {
        let trimmed = arg.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.starts_with('{') {
            return IncludeFlag::from_context_str(trimmed, false);
        }

        let path = PathBuf::from(trimmed);
        let path = if path.is_absolute() {
            path
        } else {
            root.join(path)
        };
        self.read(&path)
            .and_then(|text| IncludeFlag::from_context_str(&text, false))
    }

    fn from_router(&self, root: &Path) -> Option<IncludeFlag> {
        let router = self.read(&root.join(ROUTER_FILE))?;
        if router.lines().any(|l| l.trim() == ENTITY_IMPORT_LINE) {
            Some(IncludeFlag::yes())
        } else {
            Some(IncludeFlag::no())
        }
    }

    fn read(&self, path: &Path) -> Option<String> {
        if !self.filesystem.exists(path) {
            return None;
        }
        match self.filesystem.read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Ignoring unreadable source");
                None
            }
        }
    }

    // -------------------------------------------------------------------------
    // Prune
    // -------------------------------------------------------------------------

    fn prune(&self, root: &Path, report: &mut PruneReport) {
        for relative in EXAMPLE_FILES {
            let full = root.join(relative);
            if !self.filesystem.exists(&full) {
                report.skipped.push(PathBuf::from(relative));
                continue;
            }

            if report.dry_run {
                report.removed.push(PathBuf::from(relative));
                continue;
            }

            match self.filesystem.remove_file(&full) {
                Ok(()) => report.removed.push(PathBuf::from(relative)),
                Err(e) => {
                    warn!(path = %relative, error = %e, "Could not remove example file");
                    report.failures.push(PruneFailure {
                        path: PathBuf::from(relative),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }
}
