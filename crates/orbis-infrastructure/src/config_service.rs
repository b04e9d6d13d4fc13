//! Loading of `config.toml`.

use orbis_core::config::OrbisConfig;
use orbis_core::error::{OrbisError, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::paths::OrbisPaths;

/// Reads [`OrbisConfig`] from disk.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses the default config location (`~/.config/orbis/config.toml`).
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: OrbisPaths::config_file()?,
        })
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configuration, or defaults when the file does not exist.
    pub fn load(&self) -> Result<OrbisConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(OrbisConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        toml::from_str(&content).map_err(|e| {
            OrbisError::config(format!("Invalid {}: {}", self.path.display(), e))
        })
    }

    /// Resolved storage file: the configured path or the platform default.
    pub fn storage_path(config: &OrbisConfig) -> Result<PathBuf> {
        match &config.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(OrbisPaths::storage_file()?),
        }
    }
}
