//! Path management for Itinera's configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/itinera/           # Config directory
//! └── config.toml              # Application configuration
//!
//! ~/.local/share/itinera/      # Data directory
//! ├── storage.json             # Key-value store (users, session, itineraries, chats)
//! ├── storage.lock             # Writer lock for storage.json
//! └── logs/                    # Optional log files
//!     └── itinera.log.YYYY-MM-DD
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "itinera";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Platform config/data directory could not be determined.
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

impl From<PathError> for itinera_core::ItineraError {
    fn from(e: PathError) -> Self {
        itinera_core::ItineraError::config(e.to_string())
    }
}

/// Platform-specific locations, resolved through `dirs`.
pub struct ItineraPaths;

impl ItineraPaths {
    /// Returns the configuration directory (e.g., `~/.config/itinera/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the data directory (e.g., `~/.local/share/itinera/`).
    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Default location of the key-value store.
    pub fn store_file() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("storage.json"))
    }

    pub fn log_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("logs"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_namespaced() {
        // Skipped on hosts without a home directory.
        if let Ok(store) = ItineraPaths::store_file() {
            assert!(store.ends_with("itinera/storage.json"));
        }
        if let Ok(config) = ItineraPaths::config_file() {
            assert!(config.ends_with("itinera/config.toml"));
        }
    }
}
