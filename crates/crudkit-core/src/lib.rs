//! Domain model and use cases for crudkit.
//!
//! - [`domain`]: the example record ([`domain::Entity`]), paging, resource
//!   naming, the scaffold template model and the post-generation rules
//!   (which files belong to the example, how the include flag is read).
//! - [`application`]: [`application::EntityService`],
//!   [`application::ScaffoldService`] and [`application::PostGenService`],
//!   plus the port traits they depend on.
//! - [`error`]: [`error::CrudkitError`], the type every fallible operation
//!   above returns.
//!
//! Nothing here touches the disk, the process environment or the network
//! directly; `crudkit-adapters` supplies those through the ports.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use crudkit_core::{application::EntityService, domain::Entity};
//!
//! # fn demo(repository: Arc<dyn crudkit_core::application::ports::EntityRepository>) {
//! let service = EntityService::new(repository);
//! let entity = Entity::new("sku-1", "Widget", 9.5).unwrap();
//! service.create_entity(entity).unwrap();
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;
