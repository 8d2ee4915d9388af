use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable holding the Weatherstack access key. Takes precedence
/// over the config file so the credential never has to live on disk.
pub const API_KEY_ENV: &str = "WEATHERSTACK_API_KEY";

/// Environment variable overriding the API base URL (mainly for tests).
pub const BASE_URL_ENV: &str = "WEATHERSTACK_BASE_URL";

fn default_base_url() -> String {
    "https://api.weatherstack.com".to_string()
}

/// Configuration for the Weatherstack client, stored on disk as TOML.
///
/// Example:
/// ```toml
/// api_key = "..."
/// # base_url = "https://api.weatherstack.com"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Weatherstack access key.
    pub api_key: String,

    /// API endpoint root. Overridable so tests can point at a mock server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Config {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), base_url: default_base_url() }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolve configuration: environment first, then the config file.
    pub fn load() -> Result<Self> {
        if let Ok(api_key) = env::var(API_KEY_ENV) {
            let mut cfg = Self::new(api_key);
            if let Ok(base_url) = env::var(BASE_URL_ENV) {
                cfg.base_url = base_url;
            }
            return Ok(cfg);
        }

        let path = Self::config_file_path()?;
        if !path.exists() {
            return Err(anyhow!(
                "No Weatherstack access key configured.\n\
                 Hint: run `weatherglass configure`, or set {API_KEY_ENV}."
            ));
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherglass", "weatherglass")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_config_uses_the_production_endpoint() {
        let cfg = Config::new("KEY");
        assert_eq!(cfg.api_key, "KEY");
        assert_eq!(cfg.base_url, "https://api.weatherstack.com");
    }

    #[test]
    fn with_base_url_overrides_the_endpoint() {
        let cfg = Config::new("KEY").with_base_url("http://127.0.0.1:9999");
        assert_eq!(cfg.base_url, "http://127.0.0.1:9999");
    }

    #[test]
    fn base_url_defaults_when_absent_from_toml() {
        let cfg: Config = toml::from_str(r#"api_key = "KEY""#).expect("minimal config parses");
        assert_eq!(cfg.base_url, "https://api.weatherstack.com");
    }

    #[test]
    fn toml_roundtrip_preserves_fields() {
        let cfg = Config::new("KEY").with_base_url("http://localhost:1");
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&text).unwrap();

        assert_eq!(back.api_key, cfg.api_key);
        assert_eq!(back.base_url, cfg.base_url);
    }
}
