//! Application layer for crudkit.
//!
//! - **Services**: use case orchestration (EntityService, ScaffoldService,
//!   PostGenService)
//! - **Ports**: traits for storage, filesystem, environment and rendering
//! - **Errors**: orchestration failures
//!
//! Business rules live in `crate::domain`; this layer only coordinates.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{EntityService, PostGenService, ScaffoldService};

pub use ports::{EntityRepository, Environment, Filesystem, TemplateRenderer};

pub use error::ApplicationError;
