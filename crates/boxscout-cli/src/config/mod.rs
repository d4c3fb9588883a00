//! Application configuration module.
//!
//! Manages the optional TOML config file (API endpoint, page pacing,
//! export directory) and the TMDB credentials read from the environment.

#[allow(clippy::module_inception)]
mod config;
mod env;
mod paths;

#[allow(clippy::module_name_repetitions)]
pub use config::AppConfig;
pub use env::{credential_from_env, resolve_base_url};
pub use paths::resolve_config_path;
