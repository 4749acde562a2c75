//! Loads `config.toml` and applies environment overrides.

use crate::paths::ItineraPaths;
use itinera_core::config::AppConfig;
use itinera_core::{ItineraError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that override the config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    /// `GEMINI_API_KEY`, falling back to `GOOGLE_API_KEY`.
    pub api_key: Option<String>,
    /// `ITINERA_MODEL`
    pub model: Option<String>,
    /// `ITINERA_STORE`
    pub store_path: Option<PathBuf>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds overrides from any variable lookup. Empty values are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        Self {
            api_key: get("GEMINI_API_KEY").or_else(|| get("GOOGLE_API_KEY")),
            model: get("ITINERA_MODEL"),
            store_path: get("ITINERA_STORE").map(PathBuf::from),
        }
    }

    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(key) = &self.api_key {
            config.gemini.api_key = Some(key.clone());
        }
        if let Some(model) = &self.model {
            config.gemini.model = model.clone();
        }
        if let Some(path) = &self.store_path {
            config.storage.path = Some(path.clone());
        }
    }
}

/// Reads the application configuration.
pub struct ConfigService {
    path: PathBuf,
}

impl ConfigService {
    /// Uses `path`, or the default `<config dir>/itinera/config.toml`.
    pub fn new(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => ItineraPaths::config_file()?,
        };
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file; a missing file yields the defaults.
    pub fn load(&self) -> Result<AppConfig> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "No config file, using defaults");
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.path)?;
        AppConfig::from_toml_str(&content).map_err(|e| {
            ItineraError::config(format!("Failed to parse {}: {}", self.path.display(), e))
        })
    }

    /// Loads the file and applies `overrides`.
    pub fn load_with(&self, overrides: &EnvOverrides) -> Result<AppConfig> {
        let mut config = self.load()?;
        overrides.apply(&mut config);
        Ok(config)
    }

    /// Where the key-value store lives for `config`.
    pub fn store_path(config: &AppConfig) -> Result<PathBuf> {
        match &config.storage.path {
            Some(path) => Ok(path.clone()),
            None => Ok(ItineraPaths::store_file()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let service = ConfigService::new(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(service.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_file_values_are_read() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[gemini]\napi_key = \"from-file\"\nmodel = \"gemini-2.0-flash\"\n[storage]\npath = \"/tmp/s.json\"\n",
        )
        .unwrap();

        let config = ConfigService::new(Some(&path)).unwrap().load().unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("from-file"));
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(ConfigService::store_path(&config).unwrap(), PathBuf::from("/tmp/s.json"));
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "gemini = [").unwrap();

        let err = ConfigService::new(Some(&path)).unwrap().load().unwrap_err();
        assert!(matches!(err, ItineraError::Config(_)));
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let vars: HashMap<&str, &str> = [
            ("GOOGLE_API_KEY", "google-key"),
            ("ITINERA_MODEL", "gemini-2.5-pro"),
            ("ITINERA_STORE", ""),
        ]
        .into_iter()
        .collect();
        let overrides = EnvOverrides::from_lookup(|name| vars.get(name).map(|v| v.to_string()));

        let mut config = AppConfig::default();
        config.gemini.api_key = Some("from-file".to_string());
        overrides.apply(&mut config);

        assert_eq!(config.gemini.api_key.as_deref(), Some("google-key"));
        assert_eq!(config.gemini.model, "gemini-2.5-pro");
        assert_eq!(config.storage.path, None);
    }

    #[test]
    fn test_gemini_key_wins_over_google_key() {
        let overrides = EnvOverrides::from_lookup(|name| match name {
            "GEMINI_API_KEY" => Some("gemini".to_string()),
            "GOOGLE_API_KEY" => Some("google".to_string()),
            _ => None,
        });
        assert_eq!(overrides.api_key.as_deref(), Some("gemini"));
    }
}
