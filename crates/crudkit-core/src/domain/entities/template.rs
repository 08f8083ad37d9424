//! Project templates and the variables they are rendered with.
//!
//! A [`Template`] is an ordered list of directories and files. File content
//! is literal text, text with `{{VARIABLE}}` placeholders, or a choice
//! between two bodies keyed on a variable. Turning a template into files is
//! the job of a [`TemplateRenderer`](crate::application::ports::TemplateRenderer).

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use chrono::Datelike;

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

pub const DEFAULT_API_PREFIX: &str = "/api/v1";
pub const DEFAULT_DESCRIPTION: &str = "A minimal CRUD web service";

/// Variables available to parameterized content.
///
/// | Variable                 | For "Inventory API"   |
/// |--------------------------|-----------------------|
/// | `PROJECT_NAME`           | `Inventory API`       |
/// | `PROJECT_SLUG`           | `inventory-api`       |
/// | `PROJECT_NAME_SNAKE`     | `inventory_api`       |
/// | `DESCRIPTION`            | [`DEFAULT_DESCRIPTION`] |
/// | `API_PREFIX`             | `/api/v1`             |
/// | `INCLUDE_ENTITY_EXAMPLE` | `yes`                 |
/// | `YEAR`                   | current year          |
#[derive(Debug, Clone)]
pub struct RenderContext {
    project_name: String,
    variables: BTreeMap<String, String>,
}

impl RenderContext {
    pub fn new(project_name: impl Into<String>) -> Self {
        let project_name = project_name.into();
        let words = split_words(&project_name);

        let variables = [
            ("PROJECT_NAME", project_name.clone()),
            ("PROJECT_SLUG", words.join("-")),
            ("PROJECT_NAME_SNAKE", words.join("_")),
            ("DESCRIPTION", DEFAULT_DESCRIPTION.to_owned()),
            ("API_PREFIX", DEFAULT_API_PREFIX.to_owned()),
            ("INCLUDE_ENTITY_EXAMPLE", "yes".to_owned()),
            ("YEAR", chrono::Utc::now().year().to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_owned(), v))
        .collect();

        Self {
            project_name,
            variables,
        }
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.with_variable("DESCRIPTION", description)
    }

    pub fn with_api_prefix(self, prefix: impl Into<String>) -> Self {
        self.with_variable("API_PREFIX", prefix)
    }

    pub fn with_include_entity_example(self, flag: impl Into<String>) -> Self {
        self.with_variable("INCLUDE_ENTITY_EXAMPLE", flag)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Trimmed, ASCII case-insensitive comparison. Unknown variables never
    /// match.
    pub fn variable_equals(&self, key: &str, expected: &str) -> bool {
        self.get(key)
            .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected.trim()))
    }

    /// Substitute `{{VARIABLE}}` placeholders in one pass. Unknown names and
    /// an unterminated `{{` are copied through untouched.
    pub fn render(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(open) = rest.find("{{") {
            out.push_str(&rest[..open]);
            let after = &rest[open + 2..];
            match after.find("}}") {
                Some(close) => {
                    let name = &after[..close];
                    match self.get(name) {
                        Some(value) => out.push_str(value),
                        None => {
                            out.push_str("{{");
                            out.push_str(name);
                            out.push_str("}}");
                        }
                    }
                    rest = &after[close + 2..];
                }
                None => {
                    out.push_str(&rest[open..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Lowercased words of a project name. Breaks on anything that is not
/// alphanumeric, on `aB` and on the last capital of an acronym run
/// (`HTTPServer` gives `http`, `server`).
fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut word = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !word.is_empty() {
                words.push(std::mem::take(&mut word));
            }
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let camel = prev.is_some_and(char::is_lowercase) && c.is_uppercase();
        let acronym_end = prev.is_some_and(char::is_uppercase)
            && c.is_uppercase()
            && next.is_some_and(char::is_lowercase);

        if (camel || acronym_end) && !word.is_empty() {
            words.push(std::mem::take(&mut word));
        }
        word.extend(c.to_lowercase());
    }

    if !word.is_empty() {
        words.push(word);
    }
    words
}

/// `name@version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TemplateId {
    name: String,
    version: String,
}

impl TemplateId {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

#[derive(Debug, Clone)]
pub struct TemplateMetadata {
    pub name: String,
    pub description: String,
    pub version: String,
}

impl TemplateMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            version: "0.1.0".to_owned(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }
}

/// A project blueprint. Directories are listed before the files inside
/// them; [`Template::validate`] checks the rest.
#[derive(Debug, Clone)]
pub struct Template {
    pub id: TemplateId,
    pub metadata: TemplateMetadata,
    pub nodes: Vec<TemplateNode>,
}

impl Template {
    pub fn builder() -> TemplateBuilder {
        TemplateBuilder::default()
    }

    /// Non-empty id without `@`, named metadata, at least one node, no path
    /// listed twice.
    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.id.name();
        if name.is_empty() || name.contains('@') {
            return Err(DomainError::InvalidTemplate(format!(
                "template name '{name}' must be non-empty and must not contain '@'"
            )));
        }
        if self.metadata.name.trim().is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "template {} has no display name",
                self.id
            )));
        }
        if self.nodes.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: self.id.to_string(),
            });
        }

        let mut seen = HashSet::with_capacity(self.nodes.len());
        match self
            .nodes
            .iter()
            .map(|node| node.path().as_path())
            .find(|path| !seen.insert(*path))
        {
            Some(path) => Err(DomainError::DuplicatePath {
                path: path.display().to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[derive(Default)]
pub struct TemplateBuilder {
    id: Option<TemplateId>,
    metadata: Option<TemplateMetadata>,
    nodes: Vec<TemplateNode>,
}

impl TemplateBuilder {
    pub fn id(mut self, id: TemplateId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn metadata(mut self, metadata: TemplateMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn add_node(mut self, node: TemplateNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Requires an id, metadata and at least one node.
    pub fn build(self) -> Result<Template, DomainError> {
        let id = self
            .id
            .ok_or(DomainError::MissingRequiredField { field: "id" })?;
        let metadata = self
            .metadata
            .ok_or(DomainError::MissingRequiredField { field: "metadata" })?;
        if self.nodes.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template_id: id.to_string(),
            });
        }
        Ok(Template {
            id,
            metadata,
            nodes: self.nodes,
        })
    }
}

#[derive(Debug, Clone)]
pub enum TemplateNode {
    File(FileSpec),
    Directory(DirectorySpec),
}

impl TemplateNode {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(file) => &file.path,
            Self::Directory(dir) => &dir.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileSpec {
    pub path: RelativePath,
    pub content: TemplateContent,
    pub permissions: Permissions,
}

impl FileSpec {
    pub fn new(path: RelativePath, content: TemplateContent) -> Self {
        Self {
            path,
            content,
            permissions: Permissions::read_write(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DirectorySpec {
    pub path: RelativePath,
}

impl DirectorySpec {
    pub fn new(path: RelativePath) -> Self {
        Self { path }
    }
}

#[derive(Debug, Clone)]
pub enum TemplateContent {
    /// Copied as is.
    Literal(&'static str),
    /// `{{VARIABLE}}` placeholders are substituted.
    Parameterized(&'static str),
    /// `then` when `variable` equals `equals` (trimmed, case-insensitive),
    /// otherwise `otherwise`, or nothing when that is absent.
    Conditional {
        variable: String,
        equals: String,
        then: Box<TemplateContent>,
        otherwise: Option<Box<TemplateContent>>,
    },
}

impl TemplateContent {
    pub fn literal(text: &'static str) -> Self {
        Self::Literal(text)
    }

    pub fn parameterized(text: &'static str) -> Self {
        Self::Parameterized(text)
    }

    pub fn when(
        variable: impl Into<String>,
        equals: impl Into<String>,
        then: TemplateContent,
        otherwise: TemplateContent,
    ) -> Self {
        Self::Conditional {
            variable: variable.into(),
            equals: equals.into(),
            then: Box::new(then),
            otherwise: Some(Box::new(otherwise)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str) -> TemplateNode {
        TemplateNode::File(FileSpec::new(
            RelativePath::try_new(path).unwrap(),
            TemplateContent::literal(""),
        ))
    }

    fn header() -> TemplateBuilder {
        Template::builder()
            .id(TemplateId::new("t", "1"))
            .metadata(TemplateMetadata::new("T"))
    }

    #[test]
    fn context_derives_name_variants() {
        let ctx = RenderContext::new("Inventory API");
        assert_eq!(ctx.get("PROJECT_NAME"), Some("Inventory API"));
        assert_eq!(ctx.get("PROJECT_SLUG"), Some("inventory-api"));
        assert_eq!(ctx.get("PROJECT_NAME_SNAKE"), Some("inventory_api"));
        assert_eq!(ctx.get("API_PREFIX"), Some("/api/v1"));
        assert_eq!(ctx.get("INCLUDE_ENTITY_EXAMPLE"), Some("yes"));
    }

    #[test]
    fn words_split_on_separators_camel_case_and_acronyms() {
        assert_eq!(split_words("HTTPServer"), ["http", "server"]);
        assert_eq!(split_words("myApp"), ["my", "app"]);
        assert_eq!(split_words("my_app-name  x"), ["my", "app", "name", "x"]);
        assert_eq!(split_words("Shop 2"), ["shop", "2"]);
    }

    #[test]
    fn render_substitutes_known_and_keeps_unknown() {
        let ctx = RenderContext::new("shop").with_api_prefix("/v2");
        assert_eq!(
            ctx.render("{{PROJECT_NAME}} at {{API_PREFIX}} {{MISSING}}"),
            "shop at /v2 {{MISSING}}"
        );
    }

    #[test]
    fn render_keeps_unterminated_braces() {
        let ctx = RenderContext::new("shop");
        assert_eq!(ctx.render("a {{PROJECT_NAME"), "a {{PROJECT_NAME");
        assert_eq!(ctx.render("{{PROJECT_NAME}}}"), "shop}");
    }

    #[test]
    fn year_is_current() {
        let ctx = RenderContext::new("x");
        assert_eq!(ctx.render("{{YEAR}}"), chrono::Utc::now().year().to_string());
    }

    #[test]
    fn variable_equals_is_trimmed_and_case_insensitive() {
        let ctx = RenderContext::new("x").with_include_entity_example(" NO ");
        assert!(ctx.variable_equals("INCLUDE_ENTITY_EXAMPLE", "no"));
        assert!(!ctx.variable_equals("INCLUDE_ENTITY_EXAMPLE", "yes"));
        assert!(!ctx.variable_equals("UNKNOWN", "no"));
    }

    #[test]
    fn builder_requires_nodes_and_fields() {
        assert!(matches!(
            header().build(),
            Err(DomainError::EmptyTemplate { .. })
        ));
        assert!(matches!(
            Template::builder()
                .metadata(TemplateMetadata::new("T"))
                .add_node(file("a"))
                .build(),
            Err(DomainError::MissingRequiredField { field: "id" })
        ));
    }

    #[test]
    fn validate_rejects_duplicate_paths() {
        let template = header()
            .add_node(file("src/main.rs"))
            .add_node(file("src/main.rs"))
            .build()
            .unwrap();

        assert!(matches!(
            template.validate(),
            Err(DomainError::DuplicatePath { path }) if path == "src/main.rs"
        ));
    }

    #[test]
    fn validate_rejects_at_in_name() {
        let template = Template::builder()
            .id(TemplateId::new("a@b", "1"))
            .metadata(TemplateMetadata::new("T"))
            .add_node(file("x"))
            .build()
            .unwrap();
        assert!(matches!(
            template.validate(),
            Err(DomainError::InvalidTemplate(_))
        ));
    }
}
