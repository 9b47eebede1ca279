// restkit-cli/src/config.rs
use anyhow::{anyhow, Result};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Base URL that bare `/path` arguments resolve against
    #[serde(default)]
    pub base_url: Option<String>,
    /// Headers attached to every request; `-H` entries override them
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = config_dir.join("config.toml");

        if !config_path.exists() {
            let default = Self::default();
            default.save()?;
            return Ok(default);
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: Config = toml::from_str(&content)?;

        // Allow the base URL to be overridden by an environment variable
        if let Ok(base_url) = std::env::var("RESTKIT_BASE_URL") {
            config.base_url = Some(base_url);
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        let config_path = config_dir.join("config.toml");

        let content = toml::to_string_pretty(self)?;
        fs::write(&config_path, content)?;

        Ok(())
    }

    fn config_dir() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs.config_dir().join("restkit"))
    }

    /// Resolve a bare `/path` argument against the configured base URL;
    /// anything else passes through untouched.
    pub fn resolve_url(&self, url: &str) -> String {
        match (&self.base_url, url.starts_with('/')) {
            (Some(base), true) => format!("{}{}", base.trim_end_matches('/'), url),
            _ => url.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_url_joins_bare_paths() {
        let config = Config {
            base_url: Some("https://api.example.com/".to_string()),
            default_headers: HashMap::new(),
        };
        assert_eq!(
            config.resolve_url("/v1/things"),
            "https://api.example.com/v1/things"
        );
    }

    #[test]
    fn test_resolve_url_passes_absolute_urls_through() {
        let config = Config {
            base_url: Some("https://api.example.com".to_string()),
            default_headers: HashMap::new(),
        };
        assert_eq!(
            config.resolve_url("http://other.example.com/x"),
            "http://other.example.com/x"
        );
    }

    #[test]
    fn test_resolve_url_without_base_is_identity() {
        let config = Config::default();
        assert_eq!(config.resolve_url("/v1/things"), "/v1/things");
    }
}
