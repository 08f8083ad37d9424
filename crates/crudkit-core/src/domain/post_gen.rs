//! Post-generation vocabulary: the fixed prune list, the resolved
//! `include_entity_example` flag and the report of a prune run.
//!
//! Everything here is pure. Reading arguments, environment variables and
//! files happens in [`PostGenService`](crate::application::PostGenService).

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;

/// Example files removed when the flag resolves to "no", relative to the
/// generated project root.
pub const EXAMPLE_FILES: &[&str] = &[
    "src/services/entity_service.rs",
    "src/schemas/entity.rs",
    "src/api/v1/entities.rs",
    "tests/entity_domain.rs",
    "tests/entity_service.rs",
    "tests/entity_endpoint.rs",
    "tests/entity_flow.rs",
    "tests/memory_repository.rs",
];

/// Environment variable holding the whole generation context as JSON.
pub const CONTEXT_ENV: &str = "COOKIECUTTER_CONTEXT";

/// Environment variable holding the raw flag value.
pub const FLAG_ENV: &str = "COOKIECUTTER_INCLUDE_ENTITY_EXAMPLE";

/// Context file written next to the generated sources.
pub const CONTEXT_FILE: &str = ".cookiecutter.json";

/// Router source inspected by the last-resort heuristic.
pub const ROUTER_FILE: &str = "src/api/router.rs";

/// Line present in the router only when the example routes are mounted.
pub const ENTITY_IMPORT_LINE: &str = "use crate::api::v1::entities;";

/// Top-level key grouping generation variables in a context document.
pub const CONTEXT_KEY: &str = "cookiecutter";

/// Name of the flag inside the context.
pub const FLAG_KEY: &str = "include_entity_example";

/// Which fallback produced the flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagSource {
    Argument,
    ContextEnv,
    FlagEnv,
    ContextFile,
    RouterHeuristic,
}

impl FlagSource {
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Argument => "command-line argument",
            Self::ContextEnv => CONTEXT_ENV,
            Self::FlagEnv => FLAG_ENV,
            Self::ContextFile => CONTEXT_FILE,
            Self::RouterHeuristic => ROUTER_FILE,
        }
    }
}

impl fmt::Display for FlagSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The raw `include_entity_example` value as it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeFlag(String);

impl IncludeFlag {
    /// Wrap a raw value. Blank values are treated as absent.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn yes() -> Self {
        Self("yes".into())
    }

    pub fn no() -> Self {
        Self("no".into())
    }

    /// Interpret a JSON value: strings as-is, booleans as yes/no.
    /// Anything else yields nothing.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Self::new(s.as_str()),
            Value::Bool(true) => Some(Self::yes()),
            Value::Bool(false) => Some(Self::no()),
            _ => None,
        }
    }

    /// Extract the flag from a context document.
    ///
    /// Reads `cookiecutter.include_entity_example`; with `allow_flat` a
    /// top-level `include_entity_example` is accepted as well.
    pub fn from_context(doc: &Value, allow_flat: bool) -> Option<Self> {
        let nested = doc
            .get(CONTEXT_KEY)
            .and_then(|ctx| ctx.get(FLAG_KEY))
            .and_then(Self::from_json);
        if nested.is_some() || !allow_flat {
            return nested;
        }
        doc.get(FLAG_KEY).and_then(Self::from_json)
    }

    /// Parse JSON text and extract the flag. Malformed text yields nothing.
    pub fn from_context_str(text: &str, allow_flat: bool) -> Option<Self> {
        serde_json::from_str::<Value>(text)
            .ok()
            .and_then(|doc| Self::from_context(&doc, allow_flat))
    }

    /// True when the trimmed value equals "no", ignoring case.
    pub fn is_no(&self) -> bool {
        self.0.trim().eq_ignore_ascii_case("no")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IncludeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A file the prune step could not delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a post-generation run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Resolved flag and the source that produced it, if any source did.
    pub flag: Option<(IncludeFlag, FlagSource)>,
    pub removed: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<PruneFailure>,
    pub dry_run: bool,
}

impl PruneReport {
    /// Whether the prune list was processed at all.
    pub fn pruned(&self) -> bool {
        self.flag.as_ref().is_some_and(|(flag, _)| flag.is_no())
    }

    pub fn removed_count(&self) -> usize {
        self.removed.len()
    }

    /// Summary line, present only when something was (or would be) removed.
    pub fn summary(&self) -> Option<String> {
        if self.removed.is_empty() {
            return None;
        }
        let verb = if self.dry_run { "Would remove" } else { "Removed" };
        Some(format!(
            "{} {} entity example file(s) (include_entity_example='no')",
            verb,
            self.removed.len()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn is_no_trims_and_ignores_case() {
        for raw in ["no", "NO", " No ", "nO\n"] {
            assert!(IncludeFlag::new(raw).unwrap().is_no(), "{raw:?}");
        }
        for raw in ["yes", "n", "none", "false"] {
            assert!(!IncludeFlag::new(raw).unwrap().is_no(), "{raw:?}");
        }
    }

    #[test]
    fn blank_values_are_absent() {
        assert_eq!(IncludeFlag::new(""), None);
        assert_eq!(IncludeFlag::new("   "), None);
    }

    #[test]
    fn booleans_map_to_yes_and_no() {
        assert_eq!(IncludeFlag::from_json(&json!(false)), Some(IncludeFlag::no()));
        assert_eq!(IncludeFlag::from_json(&json!(true)), Some(IncludeFlag::yes()));
        assert_eq!(IncludeFlag::from_json(&json!(0)), None);
        assert_eq!(IncludeFlag::from_json(&json!(null)), None);
    }

    #[test]
    fn nested_context_is_read() {
        let doc = json!({"cookiecutter": {"include_entity_example": "no"}});
        assert_eq!(IncludeFlag::from_context(&doc, false), Some(IncludeFlag::no()));
    }

    #[test]
    fn flat_context_only_when_allowed() {
        let doc = json!({"include_entity_example": "no"});
        assert_eq!(IncludeFlag::from_context(&doc, false), None);
        assert_eq!(IncludeFlag::from_context(&doc, true), Some(IncludeFlag::no()));
    }

    #[test]
    fn malformed_context_yields_nothing() {
        assert_eq!(IncludeFlag::from_context_str("{not json", true), None);
        assert_eq!(IncludeFlag::from_context_str("[1, 2]", true), None);
        assert_eq!(
            IncludeFlag::from_context_str(r#"{"cookiecutter": "no"}"#, false),
            None
        );
    }

    #[test]
    fn summary_counts_removed_files() {
        let report = PruneReport {
            flag: Some((IncludeFlag::no(), FlagSource::FlagEnv)),
            removed: vec!["a".into(), "b".into()],
            ..Default::default()
        };
        assert!(report.pruned());
        assert_eq!(
            report.summary().as_deref(),
            Some("Removed 2 entity example file(s) (include_entity_example='no')")
        );
    }

    #[test]
    fn empty_report_has_no_summary() {
        assert_eq!(PruneReport::default().summary(), None);
        assert!(!PruneReport::default().pruned());
    }

    #[test]
    fn example_list_is_fixed() {
        assert_eq!(EXAMPLE_FILES.len(), 8);
        assert!(EXAMPLE_FILES.iter().all(|p| !p.starts_with('/')));
    }
}
