//! Record storage adapters.

mod memory;

pub use memory::MemoryRepository;
