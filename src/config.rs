//! Client configuration.
//!
//! Tiered, highest wins: command-line flags, then environment
//! variables, then `~/.atlas-task/config.yaml`, then built-in defaults.
//!
//! ## Environment variables
//! - `ATLAS_TASK_CONFIG_PATH` - Explicit config file path
//! - `ATLAS_TASK_URL` - Service base URL
//! - `ATLAS_TASK_TIMEOUT_SECS` - Request timeout in seconds

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the AtlasTask service.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// Discover the config file path: `ATLAS_TASK_CONFIG_PATH`, else
    /// `~/.atlas-task/config.yaml`.
    pub fn config_path() -> Option<PathBuf> {
        std::env::var("ATLAS_TASK_CONFIG_PATH")
            .ok()
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".atlas-task").join("config.yaml")))
    }

    /// Load configuration from the discovered file (when present) with
    /// environment overrides applied on top.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("ATLAS_TASK_URL")
            && !url.is_empty()
        {
            self.base_url = url;
        }
        if let Ok(raw) = std::env::var("ATLAS_TASK_TIMEOUT_SECS")
            && let Ok(secs) = raw.parse()
        {
            self.timeout_secs = secs;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
