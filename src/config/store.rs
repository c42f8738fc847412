//! Loading and saving the configuration file.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::ConfigError;

use super::Config;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV_VAR: &str = "COMMIT_GENIUS_CONFIG";

const CONFIG_DIR: &str = ".gitcommitgenius";
const CONFIG_FILE: &str = "config.json";

/// A configuration file on disk.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$COMMIT_GENIUS_CONFIG` if set, else `~/.gitcommitgenius/config.json`.
    pub fn default_location() -> Result<Self, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
            return Ok(Self::at(path));
        }

        let home = home::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::at(home.join(CONFIG_DIR).join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the configuration, writing defaults out if the file is missing.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, creating defaults", self.path.display());
                let config = Config::default();
                self.save(&config)?;
                return Ok(config);
            }
            Err(source) => {
                return Err(ConfigError::ReadFailed {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Like [`load`](Self::load), but falls back to defaults with a warning.
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                warn!("{}; using default configuration", e);
                Config::default()
            }
        }
    }

    /// Write the configuration atomically.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let write_failed = |source: std::io::Error| ConfigError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(write_failed)?;

        let mut json = serde_json::to_string_pretty(config).map_err(|e| {
            ConfigError::InvalidValue {
                key: String::new(),
                reason: e.to_string(),
            }
        })?;
        json.push('\n');

        let mut file = NamedTempFile::new_in(dir).map_err(write_failed)?;
        file.write_all(json.as_bytes()).map_err(write_failed)?;
        file.persist(&self.path)
            .map_err(|e| write_failed(e.error))?;

        debug!("Saved config to {}", self.path.display());
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Value, ConfigError> {
        self.load()?.get(key)
    }

    /// Set one value and save. Returns the updated configuration.
    pub fn set(&self, key: &str, raw: &str) -> Result<Config, ConfigError> {
        let updated = self.load()?.with_value(key, raw)?;
        self.save(&updated)?;
        Ok(updated)
    }

    pub fn reset(&self) -> Result<Config, ConfigError> {
        let config = Config::default();
        self.save(&config)?;
        Ok(config)
    }
}
