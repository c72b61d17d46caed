pub mod common;
pub mod detection;
pub mod nutrition;
pub mod recipe;
pub mod scan;
pub mod storage;
