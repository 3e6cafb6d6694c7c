//! Application configuration: TOML file under the user config directory.

pub mod loader;
pub mod types;

pub use loader::{default_config_path, ConfigError};
pub use types::{Config, LoggingConfig};
