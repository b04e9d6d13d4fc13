//! Path management for orbis configuration and storage files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/orbis/             # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/orbis/        # Data directory
//! └── storage.json             # Key-value storage (session, favorites, history)
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "orbis";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for orbis_core::OrbisError {
    fn from(err: PathError) -> Self {
        orbis_core::OrbisError::config(err.to_string())
    }
}

/// Platform directories for orbis, resolved with the `dirs` crate.
pub struct OrbisPaths;

impl OrbisPaths {
    /// Returns the orbis configuration directory (e.g. `~/.config/orbis/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the orbis data directory (e.g. `~/.local/share/orbis/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default location of the key-value storage file.
    pub fn storage_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = OrbisPaths::config_file().unwrap();
        assert!(config_file.ends_with("orbis/config.toml"));
        assert!(config_file.starts_with(OrbisPaths::config_dir().unwrap()));
    }

    #[test]
    fn test_storage_file() {
        let storage_file = OrbisPaths::storage_file().unwrap();
        assert!(storage_file.ends_with("storage.json"));
        assert!(storage_file.starts_with(OrbisPaths::data_dir().unwrap()));
    }
}
