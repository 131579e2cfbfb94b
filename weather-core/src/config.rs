use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{error::WeatherError, model::Units};

/// Environment variable that takes precedence over the stored API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

/// Value shipped in sample configs; treated the same as no key at all.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_API_KEY_HERE";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const fn default_timeout() -> u64 {
    10
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// default_units = "imperial"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    /// When set, the unit menu is skipped and these units are used.
    pub default_units: Option<Units>,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            default_units: None,
            timeout_secs: default_timeout(),
            base_url: default_base_url(),
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
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

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Pick the key to use: `env_value` (from [`API_KEY_ENV`]) wins over the
    /// stored one. Blank and placeholder keys are rejected.
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Result<String, WeatherError> {
        env_value
            .as_deref()
            .and_then(usable_key)
            .or_else(|| self.api_key.as_deref().and_then(usable_key))
            .map(str::to_owned)
            .ok_or(WeatherError::MissingApiKey)
    }
}

fn usable_key(key: &str) -> Option<&str> {
    let key = key.trim();
    (!key.is_empty() && key != PLACEHOLDER_API_KEY).then_some(key)
}
