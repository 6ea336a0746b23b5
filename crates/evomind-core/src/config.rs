//! Client configuration
//!
//! Loaded from `~/.evomind/config.toml`. The `EVOMIND_API_URL` environment
//! variable overrides the file, and an explicit override (CLI flag) beats both.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{constants, paths};

/// Configuration for the EvoMind client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend, without a trailing path
    pub api_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: constants::http::DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Load config from the default location, applying env and explicit overrides
    pub fn load(explicit_url: Option<String>) -> Result<Self> {
        let config = Self::load_from_path(&paths::config_file())?;
        let env_url = std::env::var(constants::http::API_URL_ENV).ok();
        Ok(config.with_overrides(env_url, explicit_url))
    }

    /// Load config from a specific path. A missing file yields defaults.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: ClientConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Apply overrides in precedence order: explicit beats env beats file
    pub fn with_overrides(mut self, env_url: Option<String>, explicit_url: Option<String>) -> Self {
        if let Some(url) = explicit_url.or(env_url).filter(|u| !u.trim().is_empty()) {
            self.api_base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_default() {
        let temp = TempDir::new().unwrap();
        let config = ClientConfig::load_from_path(&temp.path().join("nope.toml")).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url, "http://10.0.2.2:8000");
    }

    #[test]
    fn test_file_is_parsed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "api_base_url = \"https://api.example.com\"\n").unwrap();

        let config = ClientConfig::load_from_path(&path).unwrap();
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "api_base_url = [").unwrap();

        assert!(ClientConfig::load_from_path(&path).is_err());
    }

    #[test]
    fn test_override_precedence() {
        let base = ClientConfig::default();

        let env_only = base
            .clone()
            .with_overrides(Some("http://env:1".to_string()), None);
        assert_eq!(env_only.api_base_url, "http://env:1");

        let both = base.clone().with_overrides(
            Some("http://env:1".to_string()),
            Some("http://cli:2".to_string()),
        );
        assert_eq!(both.api_base_url, "http://cli:2");

        let blank = base.with_overrides(Some("  ".to_string()), None);
        assert_eq!(blank.api_base_url, "http://10.0.2.2:8000");
    }
}
