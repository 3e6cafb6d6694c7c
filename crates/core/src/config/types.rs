use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk application configuration.
///
/// Everything is optional with sensible defaults so a missing config file
/// behaves like an empty one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vault root to open when none is given on the command line.
    /// `~` is expanded.
    pub vault_path: Option<String>,
    /// Document id last open in a UI session.
    pub last_open_file: Option<String>,
    pub theme: String,
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vault_path: None,
            last_open_file: None,
            theme: "default".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), file: None }
    }
}
