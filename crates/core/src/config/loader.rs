use std::path::{Path, PathBuf};
use std::{env, fs};

use thiserror::Error;

use crate::config::types::Config;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("failed to parse TOML in {0}: {1}")]
    Parse(String, #[source] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("failed to write config file {0}: {1}")]
    Write(String, #[source] std::io::Error),

    #[error("user config directory not available")]
    NoConfigDir,
}

/// Default config location: `<user config dir>/notegraph/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(base.join("notegraph").join("config.toml"))
}

impl Config {
    /// Load configuration from `path`, or from the default location. A
    /// missing file yields defaults; read and parse failures surface.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        if !path.exists() {
            return Ok(Self::default());
        }

        let s = fs::read_to_string(&path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e))?;

        toml::from_str(&s).map_err(|e| ConfigError::Parse(path.display().to_string(), e))
    }

    /// Persist configuration to `path` or the default location, creating the
    /// parent directory when needed.
    pub fn save(&self, path: Option<&Path>) -> Result<(), ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path()?,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Write(parent.display().to_string(), e))?;
        }

        let s = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(&path, s).map_err(|e| ConfigError::Write(path.display().to_string(), e))
    }

    /// Resolve the configured vault root: `~` expanded, falling back to the
    /// current directory when nothing is configured.
    pub fn vault_root(&self) -> PathBuf {
        match self.vault_path.as_deref() {
            Some(p) if !p.is_empty() => PathBuf::from(shellexpand::tilde(p).into_owned()),
            _ => env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert!(cfg.vault_path.is_none());
        assert_eq!(cfg.theme, "default");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn load_round_trips_through_save() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let cfg = Config {
            vault_path: Some("/tmp/vault".to_string()),
            theme: "dark".to_string(),
            ..Config::default()
        };
        cfg.save(Some(&path)).unwrap();

        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded.vault_path.as_deref(), Some("/tmp/vault"));
        assert_eq!(loaded.theme, "dark");
    }

    #[test]
    fn parse_error_surfaces() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "theme = [not toml").unwrap();

        let result = Config::load(Some(&path));
        assert!(matches!(result, Err(ConfigError::Parse(_, _))));
    }

    #[test]
    fn vault_root_falls_back_to_cwd() {
        let cfg = Config::default();
        assert_eq!(cfg.vault_root(), env::current_dir().unwrap());
    }

    #[test]
    fn vault_root_expands_tilde() {
        let cfg = Config {
            vault_path: Some("~/notes".to_string()),
            ..Config::default()
        };
        let root = cfg.vault_root();
        assert!(!root.to_string_lossy().contains('~'));
        assert!(root.ends_with("notes"));
    }
}
