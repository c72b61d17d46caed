pub mod memory;

pub use memory::InMemoryMappingCache;
