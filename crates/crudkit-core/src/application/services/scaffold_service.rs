//! Render a template and write the result to disk. A failed write removes
//! the partially written project root again.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer},
    },
    domain::{FsEntry, ProjectStructure, RenderContext, Template},
    error::{CrudkitError, CrudkitResult},
};

pub struct ScaffoldService {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Arc<dyn Filesystem>,
}

impl ScaffoldService {
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            renderer,
            filesystem,
        }
    }

    /// Render `template` into `output_path` and write every entry.
    ///
    /// Returns the written structure so callers can report on it.
    #[instrument(
        skip_all,
        fields(
            template = %template.id,
            project = %context.project_name(),
            output_path = %output_path.as_ref().display()
        )
    )]
    pub fn scaffold(
        &self,
        template: &Template,
        context: &RenderContext,
        output_path: impl AsRef<Path>,
    ) -> CrudkitResult<ProjectStructure> {
        let structure = self.preview(template, context, output_path)?;
        self.write_structure(&structure)?;

        info!(entries = structure.entry_count(), "Scaffold completed successfully");
        Ok(structure)
    }

    /// Render without touching the filesystem.
    pub fn preview(
        &self,
        template: &Template,
        context: &RenderContext,
        output_path: impl AsRef<Path>,
    ) -> CrudkitResult<ProjectStructure> {
        template.validate().map_err(CrudkitError::Domain)?;

        let structure = self
            .renderer
            .render(template, context, output_path.as_ref())?;
        structure.validate().map_err(CrudkitError::Domain)?;

        Ok(structure)
    }

    fn write_structure(&self, structure: &ProjectStructure) -> CrudkitResult<()> {
        if self.filesystem.exists(structure.root()) {
            return Err(ApplicationError::ProjectExists {
                path: structure.root().to_path_buf(),
            }
            .into());
        }

        match self.write_all(structure) {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(error = %e, "Write failed, attempting rollback");
                self.rollback(structure.root());
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> CrudkitResult<()> {
        self.filesystem.create_dir_all(structure.root())?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    let path = structure.root().join(&dir.path);
                    self.filesystem.create_dir_all(&path)?;
                }
                FsEntry::File(file) => {
                    let path = structure.root().join(&file.path);

                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&path, &file.content)?;

                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::FakeFilesystem;
    use crate::domain::{
        FileSpec, Permissions, RelativePath, TemplateContent, TemplateId, TemplateMetadata,
        TemplateNode,
    };
    use std::path::PathBuf;

    struct EchoRenderer;

    impl TemplateRenderer for EchoRenderer {
        fn render(
            &self,
            template: &Template,
            context: &RenderContext,
            output_root: &Path,
        ) -> CrudkitResult<ProjectStructure> {
            let mut structure = ProjectStructure::new(output_root);
            for node in &template.nodes {
                if let TemplateNode::File(f) = node {
                    let body = match &f.content {
                        TemplateContent::Parameterized(s) => context.render(s),
                        TemplateContent::Literal(s) => (*s).to_owned(),
                        TemplateContent::Conditional { .. } => String::new(),
                    };
                    structure.add_file(f.path.as_path(), body, Permissions::read_write());
                }
            }
            Ok(structure)
        }
    }

    fn template() -> Template {
        Template::builder()
            .id(TemplateId::new("mini", "1.0.0"))
            .metadata(TemplateMetadata::new("Mini"))
            .add_node(TemplateNode::File(FileSpec::new(
                RelativePath::try_new("README.md").unwrap(),
                TemplateContent::parameterized("# {{PROJECT_NAME}}"),
            )))
            .add_node(TemplateNode::File(FileSpec::new(
                RelativePath::try_new("src/main.rs").unwrap(),
                TemplateContent::literal("fn main() {}"),
            )))
            .build()
            .unwrap()
    }

    #[test]
    fn scaffold_writes_rendered_files() {
        let fs = Arc::new(FakeFilesystem::default());
        let service = ScaffoldService::new(Box::new(EchoRenderer), fs.clone());

        let structure = service
            .scaffold(&template(), &RenderContext::new("shop"), "/out/shop")
            .unwrap();

        assert_eq!(structure.files().count(), 2);
        assert_eq!(
            fs.read(&PathBuf::from("/out/shop/README.md")).as_deref(),
            Some("# shop")
        );
        assert!(fs.exists(Path::new("/out/shop/src")));
    }

    #[test]
    fn scaffold_refuses_existing_directory() {
        let fs = Arc::new(FakeFilesystem::default());
        fs.create_dir_all(Path::new("/out/shop")).unwrap();
        let service = ScaffoldService::new(Box::new(EchoRenderer), fs);

        let err = service
            .scaffold(&template(), &RenderContext::new("shop"), "/out/shop")
            .unwrap_err();
        assert!(matches!(
            err,
            CrudkitError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    #[test]
    fn failed_write_rolls_back_root() {
        let fs = Arc::new(FakeFilesystem::default());
        fs.fail_writes_to("/out/shop/src/main.rs");
        let service = ScaffoldService::new(Box::new(EchoRenderer), fs.clone());

        assert!(
            service
                .scaffold(&template(), &RenderContext::new("shop"), "/out/shop")
                .is_err()
        );
        assert!(!fs.exists(Path::new("/out/shop")));
        assert!(!fs.exists(Path::new("/out/shop/README.md")));
    }

    #[test]
    fn preview_does_not_write() {
        let fs = Arc::new(FakeFilesystem::default());
        let service = ScaffoldService::new(Box::new(EchoRenderer), fs.clone());

        let structure = service
            .preview(&template(), &RenderContext::new("shop"), "/out/shop")
            .unwrap();
        assert_eq!(structure.entry_count(), 2);
        assert!(!fs.exists(Path::new("/out/shop")));
    }
}
