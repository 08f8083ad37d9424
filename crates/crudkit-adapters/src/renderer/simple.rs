//! Variable substitution renderer with conditional content.

use std::path::Path;

use crudkit_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{Permissions, ProjectStructure, RenderContext, Template, TemplateContent, TemplateNode},
    error::{CrudkitError, CrudkitResult},
};
use tracing::{debug, instrument};

/// Conditionals nested deeper than this are treated as a broken template.
const MAX_CONDITIONAL_DEPTH: usize = 8;

/// Renderer using `{{VAR}}` substitution and `Conditional` selection.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleRenderer;

impl SimpleRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template.id))]
    fn render(
        &self,
        template: &Template,
        context: &RenderContext,
        output_root: &Path,
    ) -> CrudkitResult<ProjectStructure> {
        template.validate().map_err(CrudkitError::Domain)?;

        let mut structure = ProjectStructure::new(output_root);

        for node in &template.nodes {
            match node {
                TemplateNode::File(file) => {
                    let content = render_content(&file.content, context, 0)?;
                    structure.add_file(file.path.as_path(), content, file.permissions);
                }
                TemplateNode::Directory(dir) => {
                    structure.add_directory(dir.path.as_path(), Permissions::read_write());
                }
            }
        }

        structure.validate().map_err(CrudkitError::Domain)?;
        debug!(entries = structure.entry_count(), "Template rendered");

        Ok(structure)
    }
}

fn render_content(
    content: &TemplateContent,
    ctx: &RenderContext,
    depth: usize,
) -> CrudkitResult<String> {
    if depth > MAX_CONDITIONAL_DEPTH {
        return Err(ApplicationError::RenderingFailed {
            reason: format!("conditional content nested deeper than {MAX_CONDITIONAL_DEPTH}"),
        }
        .into());
    }

    match content {
        TemplateContent::Literal(text) => Ok((*text).to_owned()),
        TemplateContent::Parameterized(text) => Ok(ctx.render(text)),
        TemplateContent::Conditional {
            variable,
            equals,
            then,
            otherwise,
        } => {
            if ctx.variable_equals(variable, equals) {
                render_content(then, ctx, depth + 1)
            } else {
                match otherwise {
                    Some(branch) => render_content(branch, ctx, depth + 1),
                    None => Ok(String::new()),
                }
            }
        }
    }
}
