//! Core domain layer for crudkit.
//!
//! Pure logic only. All I/O (storage, filesystem, environment, rendering)
//! goes through ports defined in the application layer.
//!
//! - **No async**: domain logic is synchronous
//! - **No I/O**: no filesystem, network or process access
//! - **Immutable values**: records change by building new values

pub mod entities;
pub mod error;
pub mod post_gen;
pub mod value_objects;

pub use entities::{
    common::{Permissions, RelativePath},
    entity::{Entity, EntityId, EntityPatch},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    template::{
        DirectorySpec, FileSpec, RenderContext, Template, TemplateBuilder, TemplateContent,
        TemplateId, TemplateMetadata, TemplateNode,
    },
};

pub use error::DomainError;

pub use post_gen::{EXAMPLE_FILES, FlagSource, IncludeFlag, PruneFailure, PruneReport};

pub use value_objects::{Page, RepositoryKind, ResourceNames};
