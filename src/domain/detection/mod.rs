pub mod adapters;
pub mod entities;
pub mod fusion;
pub mod normalizer;
pub mod ports;
pub mod schema;
pub mod services;
pub mod value_objects;
pub mod vocabulary;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
