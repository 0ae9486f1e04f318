// Configuration file handling

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = ".resultsreporterrc.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadConfig {
    /// Results service endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetadataConfig {
    /// Integration name sent with every payload
    #[serde(default = "default_integration_name")]
    pub integration_name: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            integration_name: default_integration_name(),
        }
    }
}

pub fn default_endpoint() -> String {
    String::from("https://www.tesults.com/results")
}

pub fn default_timeout() -> u64 {
    60
}

pub fn default_integration_name() -> String {
    String::from(env!("CARGO_PKG_NAME"))
}

impl Config {
    /// Load configuration from default locations
    pub fn load() -> Option<Self> {
        // 1. ./.resultsreporterrc.toml
        // 2. ~/.resultsreporterrc.toml
        let mut paths: Vec<PathBuf> = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd.join(CONFIG_FILE_NAME));
        }
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(CONFIG_FILE_NAME));
        }

        paths
            .iter()
            .find(|path| path.exists())
            .and_then(|path| Self::load_or_warn(path))
    }

    /// Load the file named by the launch settings, or search the default locations.
    /// Any problem falls back to defaults.
    pub fn resolve(path: Option<&Path>) -> Self {
        match path {
            Some(path) => Self::load_or_warn(path),
            None => Self::load(),
        }
        .unwrap_or_default()
    }

    fn load_or_warn(path: &Path) -> Option<Self> {
        match Self::load_from_file(path) {
            Ok(config) => {
                debug!(path = %path.display(), "loaded configuration");
                Some(config)
            }
            Err(e) => {
                warn!(path = %path.display(), "ignoring configuration file: {:#}", e);
                None
            }
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid TOML configuration")?;
        url::Url::parse(&config.upload.endpoint)
            .with_context(|| format!("Invalid upload endpoint: {}", config.upload.endpoint))?;
        Ok(config)
    }

    /// Generate default configuration as TOML
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_else(|_| String::new())
    }
}
