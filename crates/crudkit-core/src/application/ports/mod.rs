//! Application ports (traits) for external dependencies.
//!
//! Driven (output) ports are called by services and implemented in
//! `crudkit-adapters`:
//!
//! - `EntityRepository`: record storage
//! - `Filesystem`: file operations
//! - `Environment`: process environment lookups
//! - `TemplateRenderer`: template rendering

pub mod output;

pub use output::{EntityRepository, Environment, Filesystem, TemplateRenderer};
