//! Application services - orchestrate use cases.

pub mod entity_service;
pub mod post_gen_service;
pub mod scaffold_service;

pub use entity_service::EntityService;
pub use post_gen_service::PostGenService;
pub use scaffold_service::ScaffoldService;

#[cfg(test)]
pub(crate) mod test_support;
