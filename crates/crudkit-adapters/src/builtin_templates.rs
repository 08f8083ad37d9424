//! The CRUD service skeleton shipped with crudkit.
//!
//! File bodies live under `templates/crud_service/` and are compiled into the
//! binary. Shared modules that mention the example record (`services/mod.rs`,
//! `schemas/mod.rs`, `api/v1/mod.rs`, `api/router.rs`, `core/container.rs`)
//! carry two variants selected by `INCLUDE_ENTITY_EXAMPLE`, so a project
//! generated or pruned with "no" still builds.

use crudkit_core::domain::{
    DirectorySpec, DomainError, FileSpec, RelativePath, Template, TemplateContent, TemplateId,
    TemplateMetadata, TemplateNode,
};

pub const CRUD_SERVICE_ID: &str = "crud-service";
pub const CRUD_SERVICE_VERSION: &str = "1.0.0";

const INCLUDE_FLAG: &str = "INCLUDE_ENTITY_EXAMPLE";

macro_rules! tmpl {
    ($path:literal) => {
        include_str!(concat!("../templates/crud_service/", $path))
    };
}

/// Files rendered with `{{VAR}}` substitution, always present.
const COMMON_FILES: &[(&str, &str)] = &[
    ("Cargo.toml", tmpl!("Cargo.toml.tmpl")),
    ("README.md", tmpl!("README.md.tmpl")),
    (".env.example", tmpl!("env.example.tmpl")),
    (".gitignore", tmpl!("gitignore.tmpl")),
    ("src/main.rs", tmpl!("src/main.rs.tmpl")),
    ("src/lib.rs", tmpl!("src/lib.rs.tmpl")),
    ("src/core/mod.rs", tmpl!("src/core/mod.rs.tmpl")),
    ("src/core/config.rs", tmpl!("src/core/config.rs.tmpl")),
    ("src/core/logging.rs", tmpl!("src/core/logging.rs.tmpl")),
    ("src/core/shutdown.rs", tmpl!("src/core/shutdown.rs.tmpl")),
    ("src/domain/mod.rs", tmpl!("src/domain/mod.rs.tmpl")),
    ("src/domain/models.rs", tmpl!("src/domain/models.rs.tmpl")),
    ("src/domain/errors.rs", tmpl!("src/domain/errors.rs.tmpl")),
    ("src/domain/protocols.rs", tmpl!("src/domain/protocols.rs.tmpl")),
    ("src/repositories/mod.rs", tmpl!("src/repositories/mod.rs.tmpl")),
    ("src/repositories/memory.rs", tmpl!("src/repositories/memory.rs.tmpl")),
    ("src/api/mod.rs", tmpl!("src/api/mod.rs.tmpl")),
    ("src/api/error_handlers.rs", tmpl!("src/api/error_handlers.rs.tmpl")),
];

/// Shared modules with a "yes" and a "no" body.
const SWITCHED_FILES: &[(&str, &str, &str)] = &[
    (
        "src/core/container.rs",
        tmpl!("src/core/container.yes.tmpl"),
        tmpl!("src/core/container.no.tmpl"),
    ),
    (
        "src/services/mod.rs",
        tmpl!("src/services/mod.yes.tmpl"),
        tmpl!("src/services/mod.no.tmpl"),
    ),
    (
        "src/schemas/mod.rs",
        tmpl!("src/schemas/mod.yes.tmpl"),
        tmpl!("src/schemas/mod.no.tmpl"),
    ),
    (
        "src/api/v1/mod.rs",
        tmpl!("src/api/v1/mod.yes.tmpl"),
        tmpl!("src/api/v1/mod.no.tmpl"),
    ),
    (
        "src/api/router.rs",
        tmpl!("src/api/router.yes.tmpl"),
        tmpl!("src/api/router.no.tmpl"),
    ),
];

/// The example record files. These are exactly the paths post-generation
/// prunes.
const EXAMPLE_FILES: &[(&str, &str)] = &[
    ("src/services/entity_service.rs", tmpl!("src/services/entity_service.rs.tmpl")),
    ("src/schemas/entity.rs", tmpl!("src/schemas/entity.rs.tmpl")),
    ("src/api/v1/entities.rs", tmpl!("src/api/v1/entities.rs.tmpl")),
    ("tests/entity_domain.rs", tmpl!("tests/entity_domain.rs.tmpl")),
    ("tests/entity_service.rs", tmpl!("tests/entity_service.rs.tmpl")),
    ("tests/entity_endpoint.rs", tmpl!("tests/entity_endpoint.rs.tmpl")),
    ("tests/entity_flow.rs", tmpl!("tests/entity_flow.rs.tmpl")),
    ("tests/memory_repository.rs", tmpl!("tests/memory_repository.rs.tmpl")),
];

const DIRECTORIES: &[&str] = &[
    "src",
    "src/core",
    "src/domain",
    "src/repositories",
    "src/services",
    "src/schemas",
    "src/api",
    "src/api/v1",
    "tests",
];

/// Every built-in template.
pub fn all_templates() -> Result<Vec<Template>, DomainError> {
    Ok(vec![crud_service()?])
}

/// The CRUD web-service skeleton.
///
/// Example files are always part of the tree. Whether they survive is up to
/// the post-generation step, which removes them when the flag is "no".
pub fn crud_service() -> Result<Template, DomainError> {
    let mut builder = Template::builder()
        .id(TemplateId::new(CRUD_SERVICE_ID, CRUD_SERVICE_VERSION))
        .metadata(
            TemplateMetadata::new("CRUD Service")
                .version(CRUD_SERVICE_VERSION)
                .description(
                    "Minimal CRUD web service: record model, in-memory repository, \
                     service layer, HTTP endpoints and a lazy container.",
                ),
        );

    for dir in DIRECTORIES {
        builder = builder.add_node(TemplateNode::Directory(DirectorySpec::new(
            RelativePath::try_new(*dir)?,
        )));
    }

    for (path, body) in COMMON_FILES.iter().chain(EXAMPLE_FILES) {
        builder = builder.add_node(file(path, TemplateContent::parameterized(*body))?);
    }

    for (path, with_example, without_example) in SWITCHED_FILES {
        let content = TemplateContent::when(
            INCLUDE_FLAG,
            "no",
            TemplateContent::parameterized(*without_example),
            TemplateContent::parameterized(*with_example),
        );
        builder = builder.add_node(file(path, content)?);
    }

    builder.build()
}

fn file(path: &str, content: TemplateContent) -> Result<TemplateNode, DomainError> {
    Ok(TemplateNode::File(FileSpec::new(
        RelativePath::try_new(path)?,
        content,
    )))
}
