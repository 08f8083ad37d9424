//! Driven (output) ports - implemented by infrastructure.
//!
//! The `crudkit-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{Entity, EntityId, Page, ProjectStructure, RenderContext, Template};
use crate::error::CrudkitResult;

/// Port for record storage.
///
/// Implemented by:
/// - `crudkit_adapters::repository::MemoryRepository`
///
/// `update` and `delete` on an unknown id return `EntityNotFound` and leave
/// storage untouched.
#[cfg_attr(test, mockall::automock)]
pub trait EntityRepository: Send + Sync {
    /// Insert or replace by id; returns the stored record.
    fn save(&self, entity: Entity) -> CrudkitResult<Entity>;

    fn get(&self, id: &EntityId) -> CrudkitResult<Entity>;

    /// Records in insertion order, sliced by `page`.
    fn list(&self, page: Page) -> CrudkitResult<Vec<Entity>>;

    /// Replace an existing record with the same id.
    fn update(&self, entity: Entity) -> CrudkitResult<Entity>;

    fn delete(&self, id: &EntityId) -> CrudkitResult<()>;

    /// Total number of records, ignoring pagination.
    fn count(&self) -> CrudkitResult<usize>;

    /// Drop every record.
    fn clear(&self) -> CrudkitResult<()>;
}

/// Disk access for scaffolding and pruning. `crudkit_adapters::LocalFilesystem`
/// is the real implementation.
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CrudkitResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> CrudkitResult<()>;

    fn read_to_string(&self, path: &Path) -> CrudkitResult<String>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> CrudkitResult<()>;

    /// Remove a single file.
    fn remove_file(&self, path: &Path) -> CrudkitResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> CrudkitResult<()>;
}

/// Port for process environment lookups.
///
/// Implemented by:
/// - `crudkit_adapters::environment::ProcessEnvironment`
/// - `crudkit_adapters::environment::MapEnvironment` (testing)
pub trait Environment: Send + Sync {
    /// Value of `key`, or `None` when unset or not valid unicode.
    fn var(&self, key: &str) -> Option<String>;
}

/// Port for template rendering.
///
/// Implemented by:
/// - `crudkit_adapters::renderer::SimpleRenderer`
pub trait TemplateRenderer: Send + Sync {
    /// Render a template into a project structure rooted at `output_root`.
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> CrudkitResult<ProjectStructure>;
}
