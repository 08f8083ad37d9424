pub mod common;
pub mod entity;
pub mod project_structure;
pub mod template;
