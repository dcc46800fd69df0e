//! Application configuration module.
//!
//! Manages the TOML config file: catalog endpoint, relay and language, and
//! home page timing.

#[allow(clippy::module_inception)]
mod config;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::{AppConfig, CatalogConfig};
pub use paths::{resolve_config_path, resolve_state_dir};
