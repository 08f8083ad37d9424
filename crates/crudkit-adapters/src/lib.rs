//! Infrastructure adapters for crudkit.
//!
//! This crate implements the ports defined in `crudkit-core::application::ports`
//! and hosts the HTTP surface of the example service. It contains all external
//! dependencies and I/O operations.

pub mod builtin_templates;
pub mod container;
pub mod environment;
pub mod filesystem;
pub mod http;
pub mod renderer;
pub mod repository;

// Re-export commonly used adapters
pub use container::Container;
pub use environment::{MapEnvironment, ProcessEnvironment};
pub use filesystem::LocalFilesystem;
pub use http::{AppState, app_router, serve};
pub use renderer::SimpleRenderer;
pub use repository::MemoryRepository;
