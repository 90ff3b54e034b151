pub mod env;
pub mod local;
pub mod secrets;
