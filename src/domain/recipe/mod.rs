pub mod entities;
pub mod parser;
pub mod ports;
pub mod prompts;
pub mod schema;
pub mod services;
pub mod templates;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
