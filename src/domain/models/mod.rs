pub mod batch;
pub mod file;
pub mod identity;
pub mod metadata;
