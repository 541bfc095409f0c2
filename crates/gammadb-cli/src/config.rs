//! Layered configuration: built-in defaults, an optional TOML file, then
//! `-S key=value` overrides.

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;

pub use builder::build_config;
pub use models::AppConfig;
