//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "THREATWATCH_CONFIG";

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Feed URL used when none is given on the command line.
    pub default_url: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("net", "threatwatch", "threatwatch")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from file.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to file.
    pub fn save(&self) -> Result<()> {
        let path = Self::path()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;

        Ok(())
    }

    /// Set a key from its textual value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_url" | "url" => self.default_url = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "timeout_secs" | "timeout" => self.timeout_secs = Some(value.parse()?),
            _ => anyhow::bail!(
                "Unknown config key: {key}\n\n\
                 Available keys:\n  \
                 default_url    - Feed URL used when none is given\n  \
                 output_format  - pretty, json, csv or yaml\n  \
                 timeout_secs   - Request timeout in seconds"
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_known_keys() {
        let mut config = Config::default();
        config.set("default_url", "https://feeds.example.net/t.json").unwrap();
        config.set("output", "yaml").unwrap();
        config.set("timeout", "12").unwrap();

        assert_eq!(config.default_url.as_deref(), Some("https://feeds.example.net/t.json"));
        assert_eq!(config.output_format, Some(OutputFormat::Yaml));
        assert_eq!(config.timeout_secs, Some(12));
    }

    #[test]
    fn test_set_rejects_bad_input() {
        let mut config = Config::default();
        assert!(config.set("api_key", "x").is_err());
        assert!(config.set("timeout_secs", "soon").is_err());
        assert!(config.set("output_format", "xml").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_toml_roundtrip_of_partial_file() {
        let config: Config = toml::from_str("default_url = \"http://localhost/feed\"\n").unwrap();
        assert_eq!(config.default_url.as_deref(), Some("http://localhost/feed"));
        assert!(config.output_format.is_none());

        let written = toml::to_string_pretty(&config).unwrap();
        assert_eq!(toml::from_str::<Config>(&written).unwrap(), config);
    }
}
