//! Configuration file with defaults for every setting

use crate::error::{Error, Result};
use crate::heuristic::{LauncherPolicy, MIN_LAUNCHER_SIZE};
use crate::scan::DEFAULT_INSPECTION_BUDGET;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persistent settings. Command-line flags override these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Executables inspected by the folder scan, across all roots
    #[serde(default = "default_inspection_budget")]
    pub inspection_budget: usize,

    /// Executables inspected per install folder when an uninstall entry has no usable icon
    #[serde(default = "default_fallback_budget")]
    pub fallback_budget: usize,

    /// Folder under the Programs root that receives new launchers
    #[serde(default = "default_subfolder")]
    pub subfolder: String,

    /// Scanned in addition to the platform's default roots
    #[serde(default)]
    pub extra_roots: Vec<PathBuf>,

    #[serde(default = "default_min_launcher_size")]
    pub min_launcher_size: u64,

    /// Appended to the built-in deny table
    #[serde(default)]
    pub extra_deny_tokens: Vec<String>,
}

fn default_inspection_budget() -> usize {
    DEFAULT_INSPECTION_BUDGET
}

fn default_fallback_budget() -> usize {
    2000
}

fn default_subfolder() -> String {
    "Recovered".to_string()
}

fn default_min_launcher_size() -> u64 {
    MIN_LAUNCHER_SIZE
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inspection_budget: default_inspection_budget(),
            fallback_budget: default_fallback_budget(),
            subfolder: default_subfolder(),
            extra_roots: vec![],
            min_launcher_size: default_min_launcher_size(),
            extra_deny_tokens: vec![],
        }
    }
}

impl Config {
    /// Default config file location, if the platform has a config directory
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "relink", "relink")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load the default config file. A missing file means defaults; nothing is written.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = serde_json::from_str(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn launcher_policy(&self) -> LauncherPolicy {
        LauncherPolicy::default()
            .with_min_size(self.min_launcher_size)
            .with_extra_tokens(&self.extra_deny_tokens)
    }
}
