pub mod agent;
pub mod cache;
pub mod food_data;
pub mod llm;
pub mod object_storage;
pub mod vision;
