// User configuration loaded from YAML

use crate::store::StaleEditPolicy;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_DIR: &str = "prioritodo";
const CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Render priorities and completion with terminal colours
    pub color: bool,
    /// Show task ids next to each row
    pub show_ids: bool,
    /// Behaviour when the task under edit is deleted
    pub stale_edit: StaleEditPolicy,
    /// Prompt printed before each shell command
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color: true,
            show_ids: false,
            stale_edit: StaleEditPolicy::default(),
            prompt: "> ".to_string(),
        }
    }
}

impl Config {
    /// Default config location: `<config_dir>/prioritodo/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or the default location
    ///
    /// An explicit path must exist. A missing file at the default location
    /// yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => {
                    debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_yaml(&content).with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!(file = ?path, ?config, "Loaded config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        Ok(config)
    }
}
